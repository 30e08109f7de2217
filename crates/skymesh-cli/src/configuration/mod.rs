//! Layered configuration: built-in defaults, then the TOML config file, then
//! command line flags and their environment variables.

mod config;
mod settings;

pub use config::*;
pub use settings::*;
