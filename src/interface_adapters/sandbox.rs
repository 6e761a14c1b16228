// In-memory stand-in for the game server, implementing every host port.

use glam::Vec3;

use crate::domain::errors::HostError;
use crate::domain::ports::{ConVarHandle, ConVarStore, ConVarValue, ItemGrants, PlayerDirectory};
use crate::domain::rules::RuleKind;
use crate::domain::state::{PlayerId, PlayerSnapshot, Team};

pub const MAX_HEALTH: i32 = 100;

#[derive(Debug, Clone, Copy)]
pub struct SandboxPhysics {
    /// Downward acceleration in units per second squared.
    pub gravity: f32,
    /// Fraction of horizontal speed lost per second while grounded.
    pub ground_friction: f32,
}

impl Default for SandboxPhysics {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            ground_friction: 6.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SandboxPlayer {
    pub snapshot: PlayerSnapshot,
    pub weapons: Vec<String>,
    pub health: i32,
    pub armor: i32,
}

#[derive(Debug, Clone)]
pub struct SandboxHost {
    players: Vec<SandboxPlayer>,
    convars: Vec<(String, ConVarValue)>,
    physics: SandboxPhysics,
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new(SandboxPhysics::default())
    }
}

impl SandboxHost {
    /// Creates a host with the stock values of every managed console variable.
    pub fn new(physics: SandboxPhysics) -> Self {
        let convars = RuleKind::ALL
            .iter()
            .map(|kind| (kind.convar_name().to_string(), ConVarValue::Float(1.0)))
            .collect();
        Self {
            players: Vec::new(),
            convars,
            physics,
        }
    }

    pub fn spawn(&mut self, id: PlayerId, team: Team, position: Vec3) {
        self.players.retain(|p| p.snapshot.id != id);
        self.players.push(SandboxPlayer {
            snapshot: PlayerSnapshot {
                id,
                team,
                position,
                velocity: Vec3::ZERO,
                alive: true,
                on_ground: position.z <= 0.0,
            },
            weapons: vec!["weapon_knife".to_string()],
            health: MAX_HEALTH,
            armor: 0,
        });
    }

    pub fn disconnect(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.snapshot.id != id);
        self.players.len() != before
    }

    pub fn kill(&mut self, id: PlayerId) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.snapshot.alive = false;
                p.health = 0;
                true
            }
            None => false,
        }
    }

    pub fn teleport(&mut self, id: PlayerId, position: Vec3) -> bool {
        let Some(p) = self.player_mut(id) else {
            return false;
        };
        p.snapshot.position = position;
        p.snapshot.on_ground = position.z <= 0.0;
        true
    }

    /// Applies damage the way the host commits it after hooks ran.
    pub fn apply_damage(&mut self, id: PlayerId, amount: i32) -> Option<i32> {
        let p = self.player_mut(id)?;
        p.health = p.health.saturating_sub(amount.max(0)).max(0);
        if p.health == 0 {
            p.snapshot.alive = false;
        }
        Some(p.health)
    }

    /// Removes one item with a matching designer name, as a throw would.
    pub fn take_item(&mut self, id: PlayerId, item: &str) -> bool {
        let Some(p) = self.player_mut(id) else {
            return false;
        };
        match p.weapons.iter().position(|w| w == item) {
            Some(idx) => {
                p.weapons.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&SandboxPlayer> {
        self.players.iter().find(|p| p.snapshot.id == id)
    }

    pub fn players(&self) -> &[SandboxPlayer] {
        &self.players
    }

    pub fn convar(&self, name: &str) -> Option<ConVarValue> {
        self.convars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn convars(&self) -> &[(String, ConVarValue)] {
        &self.convars
    }

    /// Advances player motion by `dt` seconds: gravity, ground contact, friction.
    pub fn integrate(&mut self, dt: f32) {
        let physics = self.physics;
        for p in self.players.iter_mut().filter(|p| p.snapshot.alive) {
            let s = &mut p.snapshot;

            if !s.on_ground || s.velocity.z > 0.0 {
                s.velocity.z -= physics.gravity * dt;
            }
            s.position += s.velocity * dt;

            if s.position.z <= 0.0 && s.velocity.z <= 0.0 {
                s.position.z = 0.0;
                s.velocity.z = 0.0;
                s.on_ground = true;
            } else {
                s.on_ground = false;
            }

            if s.on_ground {
                let keep = (1.0 - physics.ground_friction * dt).max(0.0);
                s.velocity.x *= keep;
                s.velocity.y *= keep;
            }
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut SandboxPlayer> {
        self.players.iter_mut().find(|p| p.snapshot.id == id)
    }
}

impl PlayerDirectory for SandboxHost {
    fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.snapshot.id).collect()
    }

    fn snapshot(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.player(id).map(|p| p.snapshot.clone())
    }

    fn set_velocity(&mut self, id: PlayerId, velocity: Vec3) -> Result<(), HostError> {
        let p = self.player_mut(id).ok_or(HostError::PlayerGone(id))?;
        p.snapshot.velocity = velocity;
        if velocity.z > 0.0 {
            p.snapshot.on_ground = false;
        }
        Ok(())
    }

    fn weapons(&self, id: PlayerId) -> Result<Vec<String>, HostError> {
        self.player(id)
            .map(|p| p.weapons.clone())
            .ok_or(HostError::PlayerGone(id))
    }

    fn restore_health(
        &mut self,
        id: PlayerId,
        amount: i32,
        armor: Option<i32>,
    ) -> Result<(), HostError> {
        let p = self.player_mut(id).ok_or(HostError::PlayerGone(id))?;
        p.health = p.health.saturating_add(amount.max(0));
        if let Some(armor) = armor {
            p.armor = armor;
        }
        Ok(())
    }
}

impl ItemGrants for SandboxHost {
    fn give_named_item(&mut self, id: PlayerId, item: &str) -> Result<(), HostError> {
        let p = self.player_mut(id).ok_or(HostError::PlayerGone(id))?;
        p.weapons.push(item.to_string());
        Ok(())
    }
}

impl ConVarStore for SandboxHost {
    fn find(&self, name: &str) -> Option<ConVarHandle> {
        self.convars
            .iter()
            .position(|(n, _)| n == name)
            .map(|idx| ConVarHandle(idx as u32))
    }

    fn get(&self, handle: ConVarHandle) -> Result<ConVarValue, HostError> {
        self.convars
            .get(handle.0 as usize)
            .map(|(_, v)| *v)
            .ok_or(HostError::StaleHandle(handle.0))
    }

    fn set(&mut self, handle: ConVarHandle, value: ConVarValue) -> Result<(), HostError> {
        let (_, current) = self
            .convars
            .get_mut(handle.0 as usize)
            .ok_or(HostError::StaleHandle(handle.0))?;
        *current = value;
        Ok(())
    }
}
