use std::{env, path::PathBuf, time::Duration};

use crate::interface_adapters::config_file::DEFAULT_CONFIG_PATH;

// Runtime/sandbox constants (not gameplay tuning).

pub fn config_path() -> PathBuf {
    env::var("GRENADE_BOOST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn tick_interval() -> Duration {
    let millis = env::var("SANDBOX_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    Duration::from_millis(millis)
}

pub const INPUT_CHANNEL_CAPACITY: usize = 256;

// 64-tick server.
pub const DEFAULT_TICK_MS: u64 = 1000 / 64;
