// Domain layer: core boost physics, rule lifecycle and host ports.

pub mod config;
pub mod errors;
pub mod ports;
pub mod rules;
pub mod state;
pub mod systems;
pub mod tuning;

pub use state::{BlastEvent, DamageInfo, HookResult, PlayerHurt, PlayerId, PlayerSnapshot, Team};
