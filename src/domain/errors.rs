use thiserror::Error;

use super::state::PlayerId;

// Failures reported by host ports.
#[derive(Debug, Error, PartialEq)]
pub enum HostError {
    #[error("player {0} is no longer valid")]
    PlayerGone(PlayerId),
    #[error("console variable {0} not found")]
    ConVarMissing(String),
    #[error("console variable {0} rejected the write")]
    ConVarRejected(String),
    #[error("console variable handle {0} is stale")]
    StaleHandle(u32),
    #[error("item {item} could not be granted to player {player}")]
    GrantFailed { player: PlayerId, item: String },
}

// Errors raised while building or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}

// Handler-level errors. The dispatcher logs these and never propagates them to the host.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("malformed event payload: {0}")]
    MalformedEvent(&'static str),
}
