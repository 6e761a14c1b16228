// JSON config file adapter: create, load, migrate and persist PluginConfig.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::config::PluginConfig;
use crate::domain::errors::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "configs/plugins/GrenadeBoost/GrenadeBoost.json";

/// Loads the config at `path`, creating it with defaults when missing.
///
/// An outdated config is migrated and written back. Write failures are
/// logged and do not prevent the loaded config from being used.
pub fn load_or_create(path: &Path) -> Result<PluginConfig, ConfigError> {
    if !path.exists() {
        let config = PluginConfig::default();
        match save(path, &config) {
            Ok(()) => info!(path = %path.display(), "config file created"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to create config"),
        }
        return Ok(config);
    }

    let raw = fs::read_to_string(path)?;
    let mut config: PluginConfig = serde_json::from_str(&raw)?;

    if config.migrate() {
        match save(path, &config) {
            Ok(()) => info!(
                path = %path.display(),
                version = config.config_version,
                "config updated"
            ),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to save updated config"),
        }
    }
    Ok(config)
}

pub fn save(path: &Path, config: &PluginConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
