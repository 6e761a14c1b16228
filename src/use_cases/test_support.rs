use std::collections::BTreeMap;

use glam::Vec3;

use crate::domain::errors::HostError;
use crate::domain::ports::{ConVarHandle, ConVarStore, ConVarValue, ItemGrants, PlayerDirectory};
use crate::domain::state::{PlayerId, PlayerSnapshot, Team};

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub set_velocity: bool,
    pub give_item: bool,
    pub convar_set: bool,
    pub weapons: bool,
    // Panic inside `set_velocity` once this many writes were recorded.
    pub panic_after_velocity_writes: Option<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct FakePlayer {
    pub snapshot: PlayerSnapshot,
    pub weapons: Vec<String>,
    pub health: i32,
    pub armor: i32,
}

// In-memory host that records every write for use-case tests.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub players: BTreeMap<PlayerId, FakePlayer>,
    pub convars: Vec<(String, ConVarValue)>,
    pub grants: Vec<(PlayerId, String)>,
    pub velocity_writes: Vec<(PlayerId, Vec3)>,
    pub convar_writes: Vec<(String, ConVarValue)>,
    pub failures: FailureFlags,
    // Convar names whose writes are rejected even when `failures.convar_set` is off.
    pub rejected_convars: Vec<String>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Host with the stock values of the three managed console variables.
    pub(crate) fn with_default_convars() -> Self {
        let mut host = Self::new();
        host.convars = vec![
            ("weapon_air_spread_scale".to_string(), ConVarValue::Float(1.0)),
            ("sv_falldamage_scale".to_string(), ConVarValue::Float(1.0)),
            (
                "sv_hegrenade_damage_multiplier".to_string(),
                ConVarValue::Float(1.0),
            ),
        ];
        host
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn add_player(&mut self, id: PlayerId, team: Team, position: Vec3) {
        self.players.insert(
            id,
            FakePlayer {
                snapshot: PlayerSnapshot {
                    id,
                    team,
                    position,
                    velocity: Vec3::ZERO,
                    alive: true,
                    on_ground: true,
                },
                weapons: vec!["weapon_knife".to_string()],
                health: 100,
                armor: 0,
            },
        );
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut FakePlayer {
        self.players.get_mut(&id).expect("test player should exist")
    }

    pub(crate) fn velocity(&self, id: PlayerId) -> Vec3 {
        self.players
            .get(&id)
            .map(|p| p.snapshot.velocity)
            .expect("test player should exist")
    }

    pub(crate) fn convar(&self, name: &str) -> Option<ConVarValue> {
        self.convars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

impl PlayerDirectory for RecordingHost {
    fn player_ids(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    fn snapshot(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.players.get(&id).map(|p| p.snapshot.clone())
    }

    fn set_velocity(&mut self, id: PlayerId, velocity: Vec3) -> Result<(), HostError> {
        if self.failures.set_velocity {
            return Err(HostError::PlayerGone(id));
        }
        if let Some(limit) = self.failures.panic_after_velocity_writes
            && self.velocity_writes.len() >= limit
        {
            panic!("host crashed during velocity write");
        }
        let player = self.players.get_mut(&id).ok_or(HostError::PlayerGone(id))?;
        player.snapshot.velocity = velocity;
        self.velocity_writes.push((id, velocity));
        Ok(())
    }

    fn weapons(&self, id: PlayerId) -> Result<Vec<String>, HostError> {
        if self.failures.weapons {
            return Err(HostError::PlayerGone(id));
        }
        self.players
            .get(&id)
            .map(|p| p.weapons.clone())
            .ok_or(HostError::PlayerGone(id))
    }

    fn restore_health(
        &mut self,
        id: PlayerId,
        amount: i32,
        armor: Option<i32>,
    ) -> Result<(), HostError> {
        let player = self.players.get_mut(&id).ok_or(HostError::PlayerGone(id))?;
        player.health += amount;
        if let Some(armor) = armor {
            player.armor = armor;
        }
        Ok(())
    }
}

impl ItemGrants for RecordingHost {
    fn give_named_item(&mut self, id: PlayerId, item: &str) -> Result<(), HostError> {
        if self.failures.give_item {
            return Err(HostError::GrantFailed {
                player: id,
                item: item.to_string(),
            });
        }
        let player = self.players.get_mut(&id).ok_or(HostError::PlayerGone(id))?;
        player.weapons.push(item.to_string());
        self.grants.push((id, item.to_string()));
        Ok(())
    }
}

impl ConVarStore for RecordingHost {
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
        let (name, current) = self
            .convars
            .get_mut(handle.0 as usize)
            .ok_or(HostError::StaleHandle(handle.0))?;
        if self.failures.convar_set || self.rejected_convars.iter().any(|r| *r == *name) {
            return Err(HostError::ConVarRejected(name.clone()));
        }
        *current = value;
        self.convar_writes.push((name.clone(), value));
        Ok(())
    }
}
