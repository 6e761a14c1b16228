// Use-case level inputs for the plugin dispatcher.

use crate::domain::{BlastEvent, PlayerHurt};

#[derive(Debug, Clone)]
pub enum HostEvent {
    GrenadeDetonated(BlastEvent),
    RoundStart,
    PlayerHurt(PlayerHurt),
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::GrenadeDetonated(_) => "hegrenade_detonate",
            HostEvent::RoundStart => "round_start",
            HostEvent::PlayerHurt(_) => "player_hurt",
        }
    }
}

/// Work queued for the next host tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Grenade top-up; players are not spawned yet when round_start fires.
    Resupply,
}
