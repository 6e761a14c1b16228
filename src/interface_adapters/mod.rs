// Interface adapters: config file, sandbox host and operator console.

pub mod config_file;
pub mod console;
pub mod sandbox;
