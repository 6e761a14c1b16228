use glam::Vec3;

use super::errors::HostError;
use super::state::{PlayerId, PlayerSnapshot};

// Opaque handle to a host console variable; valid only for the session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConVarHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConVarValue {
    Float(f32),
    Bool(bool),
}

impl std::fmt::Display for ConVarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConVarValue::Float(v) => write!(f, "{v}"),
            ConVarValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

// Port for reading connected players and writing back velocity/health.
pub trait PlayerDirectory {
    fn player_ids(&self) -> Vec<PlayerId>;
    fn snapshot(&self, id: PlayerId) -> Option<PlayerSnapshot>;
    fn set_velocity(&mut self, id: PlayerId, velocity: Vec3) -> Result<(), HostError>;
    /// Designer names of the weapons currently held by the player.
    fn weapons(&self, id: PlayerId) -> Result<Vec<String>, HostError>;
    /// Adds health back to the player's pawn and optionally resets armor.
    fn restore_health(
        &mut self,
        id: PlayerId,
        amount: i32,
        armor: Option<i32>,
    ) -> Result<(), HostError>;
}

// Port for the named-item grant primitive.
pub trait ItemGrants {
    fn give_named_item(&mut self, id: PlayerId, item: &str) -> Result<(), HostError>;
}

// Port for console variable lookup and mutation.
pub trait ConVarStore {
    fn find(&self, name: &str) -> Option<ConVarHandle>;
    fn get(&self, handle: ConVarHandle) -> Result<ConVarValue, HostError>;
    fn set(&mut self, handle: ConVarHandle, value: ConVarValue) -> Result<(), HostError>;
}

/// Everything the plugin needs from the host, borrowed per call.
pub trait GameHost: PlayerDirectory + ItemGrants + ConVarStore {}

impl<T> GameHost for T where T: PlayerDirectory + ItemGrants + ConVarStore {}
