#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use clap::Arg;
use clap::ArgAction;
use clap::Command;
use strum::IntoEnumIterator;

use crate::configuration::{Config, ConfigKey};

pub const DEBUG_FLAG: &str = "debug";
pub const PRINT_CONFIG_FLAG: &str = "print-config";
const IGNORED_ARGS: &str = "ignored";

/// Hidden override for one config key, also read from its env var.
fn config_arg(key: ConfigKey) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(key.env_var())
        .num_args(1)
        .hide(true)
        .help(format!("{} [default: {}]", key.description(), Config::default(key)));
}

pub fn build() -> Command {
    let cmd = Command::new("skymesh")
        .about("Keyboard-driven menu for connecting, switching and inspecting Tailscale accounts.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(DEBUG_FLAG)
                .long(DEBUG_FLAG)
                .action(ArgAction::SetTrue)
                .help("Capture a full trace to trace.out and clear the screen before the menu."),
        )
        .arg(
            Arg::new(PRINT_CONFIG_FLAG)
                .long(PRINT_CONFIG_FLAG)
                .action(ArgAction::SetTrue)
                .help("Print a default config.toml and exit."),
        )
        .arg(
            Arg::new(IGNORED_ARGS)
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .hide(true),
        );

    return ConfigKey::iter().fold(cmd, |cmd, key| cmd.arg(config_arg(key)));
}
