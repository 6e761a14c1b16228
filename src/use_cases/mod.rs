// Use cases layer: event handlers and lifecycle for the grenade boost plugin.

pub mod damage;
pub mod detonation;
pub mod overrides;
pub mod plugin;
pub mod resupply;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use overrides::RuleOverrideManager;
pub use plugin::GrenadeBoostPlugin;
pub use types::{DeferredTask, HostEvent};
