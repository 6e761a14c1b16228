//! Gameplay tuning for the grenade boost impulse.
//!
//! Built from `PluginConfig` in one step so a reload swaps the whole value.

use crate::domain::config::PluginConfig;
use crate::domain::errors::ConfigError;

/// Horizontal offset (units) at which a player receives the full horizontal push.
pub const FULL_HORIZONTAL_DISTANCE: f32 = 100.0;

/// Separations below this are treated as co-located and skipped.
pub const MIN_SEPARATION: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostParameters {
    /// Horizontal push at the epicenter, in units per second.
    pub horizontal_boost: f32,

    /// Upward push at the epicenter, in units per second.
    pub vertical_boost: f32,

    /// Scales the distance falloff; 1.0 leaves it unchanged.
    pub boost_multiplier: f32,

    /// Upper bound on the resulting speed.
    pub max_boost_velocity: f32,

    /// Players at or beyond this distance are untouched.
    pub blast_radius: f32,

    pub only_boost_in_air: bool,
    pub ignore_team_grenades: bool,
}

impl Default for BoostParameters {
    fn default() -> Self {
        Self {
            horizontal_boost: 800.0,
            vertical_boost: 400.0,
            boost_multiplier: 1.2,
            max_boost_velocity: 3500.0,
            blast_radius: 350.0,
            only_boost_in_air: false,
            ignore_team_grenades: false,
        }
    }
}

impl TryFrom<&PluginConfig> for BoostParameters {
    type Error = ConfigError;

    fn try_from(cfg: &PluginConfig) -> Result<Self, Self::Error> {
        let params = Self {
            horizontal_boost: cfg.horizontal_boost,
            vertical_boost: cfg.vertical_boost,
            boost_multiplier: cfg.boost_multiplier,
            max_boost_velocity: cfg.max_boost_velocity,
            blast_radius: cfg.blast_radius,
            only_boost_in_air: cfg.only_boost_in_air,
            ignore_team_grenades: cfg.ignore_team_grenades,
        };
        params.validate()?;
        Ok(params)
    }
}

impl BoostParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("HorizontalBoost", self.horizontal_boost),
            ("VerticalBoost", self.vertical_boost),
            ("BoostMultiplier", self.boost_multiplier),
            ("MaxBoostVelocity", self.max_boost_velocity),
            ("BlastRadius", self.blast_radius),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue(format!("{name} must be finite")));
            }
        }
        if self.blast_radius <= 0.0 {
            return Err(ConfigError::InvalidValue("BlastRadius must be > 0".into()));
        }
        if self.max_boost_velocity <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "MaxBoostVelocity must be > 0".into(),
            ));
        }
        if self.boost_multiplier < 0.0 {
            return Err(ConfigError::InvalidValue(
                "BoostMultiplier must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_default_config() {
        let params = BoostParameters::try_from(&PluginConfig::default()).expect("valid");
        assert_eq!(params, BoostParameters::default());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let cfg = PluginConfig {
            blast_radius: 0.0,
            ..PluginConfig::default()
        };
        let err = BoostParameters::try_from(&cfg).unwrap_err();
        assert!(err.to_string().contains("BlastRadius"));
    }

    #[test]
    fn rejects_nan_boost() {
        let cfg = PluginConfig {
            vertical_boost: f32::NAN,
            ..PluginConfig::default()
        };
        assert!(BoostParameters::try_from(&cfg).is_err());
    }
}
