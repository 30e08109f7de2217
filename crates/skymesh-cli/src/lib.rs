//! Menu front-end for the tailscale CLI.
//!
//! `app` owns the boot sequence and every menu flow; `configuration` resolves
//! settings from defaults, the config file and flags.

pub mod app;
pub mod cli;
pub mod configuration;
pub mod logging;
pub mod menu_action;

pub use app::{App, Outcome};
pub use configuration::{Config, ConfigKey, Settings};
pub use menu_action::MenuAction;
