// Server-wide rule overrides and their capture/apply/restore lifecycle.

use super::errors::HostError;
use super::ports::{ConVarHandle, ConVarStore, ConVarValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    AirAccuracy,
    FallDamage,
    GrenadeDamage,
}

impl RuleKind {
    pub const ALL: [RuleKind; 3] = [
        RuleKind::AirAccuracy,
        RuleKind::FallDamage,
        RuleKind::GrenadeDamage,
    ];

    /// Console variable backing this rule.
    pub fn convar_name(self) -> &'static str {
        match self {
            RuleKind::AirAccuracy => "weapon_air_spread_scale",
            RuleKind::FallDamage => "sv_falldamage_scale",
            RuleKind::GrenadeDamage => "sv_hegrenade_damage_multiplier",
        }
    }

    pub fn override_value(self) -> ConVarValue {
        match self {
            RuleKind::AirAccuracy | RuleKind::FallDamage | RuleKind::GrenadeDamage => {
                ConVarValue::Float(0.0)
            }
        }
    }
}

/// Lifecycle of one managed rule.
///
/// `original` is read once, before the first override write, and carried
/// through `Active` so restore never depends on the live value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleState {
    Uninitialized,
    Captured {
        handle: ConVarHandle,
        original: ConVarValue,
    },
    Active {
        handle: ConVarHandle,
        original: ConVarValue,
    },
    Restored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleOverride {
    pub kind: RuleKind,
    pub override_value: ConVarValue,
    pub state: RuleState,
}

impl RuleOverride {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            override_value: kind.override_value(),
            state: RuleState::Uninitialized,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.convar_name()
    }

    pub fn original(&self) -> Option<ConVarValue> {
        match self.state {
            RuleState::Captured { original, .. } | RuleState::Active { original, .. } => {
                Some(original)
            }
            RuleState::Uninitialized | RuleState::Restored => None,
        }
    }

    /// Reads and stores the current value as the original.
    ///
    /// A rule that already holds an original keeps it, so a config reload
    /// never captures a value this plugin wrote itself.
    pub fn capture<S: ConVarStore + ?Sized>(&mut self, store: &S) -> Result<(), HostError> {
        if self.original().is_some() {
            return Ok(());
        }

        let handle = store
            .find(self.name())
            .ok_or_else(|| HostError::ConVarMissing(self.name().to_string()))?;
        let original = store.get(handle)?;
        self.state = RuleState::Captured { handle, original };
        Ok(())
    }

    /// Writes the override value. Safe to repeat every round.
    ///
    /// Returns false when there is nothing to apply (never captured or already restored).
    pub fn apply<S: ConVarStore + ?Sized>(&mut self, store: &mut S) -> Result<bool, HostError> {
        let (handle, original) = match self.state {
            RuleState::Captured { handle, original } | RuleState::Active { handle, original } => {
                (handle, original)
            }
            RuleState::Uninitialized | RuleState::Restored => return Ok(false),
        };

        store.set(handle, self.override_value)?;
        self.state = RuleState::Active { handle, original };
        Ok(true)
    }

    /// Writes the captured original back, at most once per capture.
    ///
    /// Returns the restored value, or `None` when nothing was captured.
    pub fn restore<S: ConVarStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Option<ConVarValue>, HostError> {
        let (handle, original) = match self.state {
            RuleState::Captured { handle, original } | RuleState::Active { handle, original } => {
                (handle, original)
            }
            RuleState::Uninitialized | RuleState::Restored => return Ok(None),
        };

        store.set(handle, original)?;
        self.state = RuleState::Restored;
        Ok(Some(original))
    }
}
