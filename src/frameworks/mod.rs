// Frameworks: runtime bootstrap, environment config and the sandbox loop.

pub mod config;
pub mod server;
