// Domain-level player, blast and damage records read per event.

use glam::Vec3;

pub type PlayerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Spectator,
    Terrorist,
    CounterTerrorist,
}

/// Per-player state read from the host when an event is processed.
///
/// Snapshots are copies; the only value written back is the velocity,
/// and that goes through `PlayerDirectory::set_velocity`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub team: Team,
    pub position: Vec3,
    pub velocity: Vec3,
    pub alive: bool,
    pub on_ground: bool,
}

/// A grenade detonation as delivered by the host event stream.
///
/// Thrower and origin are optional because the raw payload can carry nulls;
/// such events are treated as malformed and left unconsumed.
#[derive(Debug, Clone, PartialEq)]
pub struct BlastEvent {
    pub id: u64,
    pub thrower: Option<PlayerId>,
    pub origin: Option<Vec3>,
}

impl BlastEvent {
    /// Returns the origin only when it is present and finite.
    pub fn valid_origin(&self) -> Option<Vec3> {
        self.origin.filter(|o| o.is_finite())
    }
}

/// Post-commit damage notification (player_hurt).
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerHurt {
    pub victim: Option<PlayerId>,
    pub attacker: Option<PlayerId>,
    pub weapon: String,
    pub health_lost: i32,
    pub armor: i32,
}

/// Pre-commit damage record passed to the take-damage hook.
///
/// The hook may rewrite `damage` before the host applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageInfo {
    pub victim: PlayerId,
    pub attacker: Option<PlayerId>,
    pub weapon_class: String,
    pub damage: f32,
}

/// Signal returned to the host dispatcher by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Let the host continue with unchanged values.
    Continue,
    /// Values on the event were rewritten; the host must use them.
    Changed,
    /// The event was fully handled by this plugin.
    Handled,
}
