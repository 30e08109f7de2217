use std::str::FromStr;

use anyhow::Context;
use anyhow::Result;
use skymesh_term::NavigationPolicy;

use super::{Config, ConfigKey};

/// Resolved configuration handed to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tool_binary: String,
    pub login_url: String,
    pub installer_url: String,
    pub install_script_url: String,
    pub countdown: u32,
    pub navigation: NavigationPolicy,
    /// Trace mode clears the screen before entering the menu.
    pub trace: bool,
}

impl Settings {
    pub fn from_config(trace: bool) -> Result<Settings> {
        return Settings::resolve(Config::get, trace);
    }

    /// Builds settings from any key lookup, validating numeric and enum keys.
    pub fn resolve<F: Fn(ConfigKey) -> String>(lookup: F, trace: bool) -> Result<Settings> {
        let countdown = lookup(ConfigKey::Countdown);
        let countdown = countdown
            .parse::<u32>()
            .with_context(|| format!("invalid countdown: {countdown}"))?;

        let navigation = lookup(ConfigKey::Navigation);
        let navigation = NavigationPolicy::from_str(&navigation)
            .with_context(|| format!("invalid navigation: {navigation}"))?;

        return Ok(Settings {
            tool_binary: lookup(ConfigKey::ToolBinary),
            login_url: lookup(ConfigKey::LoginUrl),
            installer_url: lookup(ConfigKey::InstallerUrl),
            install_script_url: lookup(ConfigKey::InstallScriptUrl),
            countdown,
            navigation,
            trace,
        });
    }
}

impl Default for Settings {
    fn default() -> Settings {
        return Settings {
            tool_binary: Config::default(ConfigKey::ToolBinary),
            login_url: Config::default(ConfigKey::LoginUrl),
            installer_url: Config::default(ConfigKey::InstallerUrl),
            install_script_url: Config::default(ConfigKey::InstallScriptUrl),
            countdown: 3,
            navigation: NavigationPolicy::default(),
            trace: false,
        };
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
