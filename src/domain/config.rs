// Plugin configuration as stored in GrenadeBoost.json.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CURRENT_CONFIG_VERSION: u32 = 2;

/// How grenade (and, for `HealthRestore`, fall) damage is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamageBlockMode {
    /// Scale the damage to zero through a server console variable.
    #[default]
    ConVar,
    /// Zero the damage in the pre-commit take-damage hook.
    TakeDamageHook,
    /// Refund health after the host reported the damage.
    HealthRestore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PluginConfig {
    pub config_version: u32,
    pub enabled: bool,

    // Grenade settings.
    #[serde(rename = "AutoGiveHEGrenade")]
    pub auto_give_he_grenade: bool,
    #[serde(rename = "MaxHEGrenades")]
    pub max_he_grenades: u32,

    // Boost physics.
    pub horizontal_boost: f32,
    pub vertical_boost: f32,
    pub boost_multiplier: f32,
    pub max_boost_velocity: f32,
    pub blast_radius: f32,
    pub only_boost_in_air: bool,
    pub ignore_team_grenades: bool,

    // Gameplay features.
    pub enable_air_accuracy: bool,
    #[serde(rename = "DisableHEGrenadeDamage")]
    pub disable_he_grenade_damage: bool,
    pub disable_fall_damage: bool,
    pub damage_block_mode: DamageBlockMode,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION,
            enabled: true,
            auto_give_he_grenade: true,
            max_he_grenades: 1,
            horizontal_boost: 800.0,
            vertical_boost: 400.0,
            boost_multiplier: 1.2,
            max_boost_velocity: 3500.0,
            blast_radius: 350.0,
            only_boost_in_air: false,
            ignore_team_grenades: false,
            enable_air_accuracy: false,
            disable_he_grenade_damage: false,
            disable_fall_damage: false,
            damage_block_mode: DamageBlockMode::ConVar,
        }
    }
}

impl PluginConfig {
    /// Brings an older config up to the current version.
    ///
    /// Physics fields are forced back to the current defaults because their
    /// meaning changed between versions. Returns true when anything changed so
    /// the caller can persist the result.
    pub fn migrate(&mut self) -> bool {
        if self.config_version >= CURRENT_CONFIG_VERSION {
            return false;
        }

        warn!(
            found = self.config_version,
            required = CURRENT_CONFIG_VERSION,
            "config version mismatch, resetting physics to defaults"
        );

        let defaults = PluginConfig::default();
        self.config_version = CURRENT_CONFIG_VERSION;
        self.horizontal_boost = defaults.horizontal_boost;
        self.vertical_boost = defaults.vertical_boost;
        self.boost_multiplier = defaults.boost_multiplier;
        self.max_boost_velocity = defaults.max_boost_velocity;
        self.blast_radius = defaults.blast_radius;
        true
    }

    pub fn blocks_grenade_damage_with(&self, mode: DamageBlockMode) -> bool {
        self.disable_he_grenade_damage && self.damage_block_mode == mode
    }
}
