#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::str::FromStr;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use skymesh_core::installer::DEFAULT_INSTALLER_URL;
use skymesh_core::installer::DEFAULT_INSTALL_SCRIPT_URL;
use skymesh_core::login::DEFAULT_LOGIN_ENDPOINT;
use skymesh_term::NavigationPolicy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;
use toml_edit::Item;
use toml_edit::Value;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

const NAVIGATION_VALUES: &str = "wrap, clamp";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    Countdown,
    InstallScriptUrl,
    InstallerUrl,
    LogFile,
    LogLevel,
    LoginUrl,
    Navigation,
    ToolBinary,
}

impl ConfigKey {
    /// `tool-binary` is read from `SKYMESH_TOOL_BINARY`.
    pub fn env_var(self) -> String {
        return format!("SKYMESH_{}", self.to_string().to_uppercase().replace('-', "_"));
    }

    pub fn description(self) -> &'static str {
        match self {
            ConfigKey::ConfigFile => "Path to the configuration file.",
            ConfigKey::Countdown => {
                "Seconds to wait before continuing automatically after startup checks."
            }
            ConfigKey::InstallScriptUrl => {
                "Linux install script downloaded when tailscale is missing."
            }
            ConfigKey::InstallerUrl => "Windows installer downloaded when tailscale is missing.",
            ConfigKey::LogFile => "File that receives log output.",
            ConfigKey::LogLevel => "Log level written to the log file.",
            ConfigKey::LoginUrl => "Endpoint that exchanges account credentials for an auth key.",
            ConfigKey::Navigation => "What arrow keys do at the ends of a menu.",
            ConfigKey::ToolBinary => "Name or path of the tailscale executable.",
        }
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::Countdown => "3",
            ConfigKey::InstallScriptUrl => DEFAULT_INSTALL_SCRIPT_URL,
            ConfigKey::InstallerUrl => DEFAULT_INSTALLER_URL,
            ConfigKey::LogFile => "skymesh.log",
            ConfigKey::LogLevel => "info",
            ConfigKey::LoginUrl => DEFAULT_LOGIN_ENDPOINT,
            ConfigKey::Navigation => "wrap",
            ConfigKey::ToolBinary => "tailscale",
            ConfigKey::ConfigFile => {
                return dirs::config_dir()
                    .unwrap_or_else(|| path::PathBuf::from("."))
                    .join("skymesh/config.toml")
                    .to_string_lossy()
                    .to_string();
            }
        };

        return res.to_string();
    }

    /// Defaults, then `config.toml`, then flags and their env vars.
    pub async fn load(matches: &ArgMatches) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key));
        }

        let config_file = Config::flag(matches, ConfigKey::ConfigFile)
            .unwrap_or_else(|| Config::default(ConfigKey::ConfigFile));
        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            Config::apply_toml(&toml_str)
                .with_context(|| format!("failed to load {}", config_path.display()))?;
        }

        for key in ConfigKey::iter() {
            if let Some(val) = Config::flag(matches, key) {
                Config::set(key, &val);
            }
        }

        log::debug!(
            "config: tool-binary={} navigation={} countdown={}",
            Config::get(ConfigKey::ToolBinary),
            Config::get(ConfigKey::Navigation),
            Config::get(ConfigKey::Countdown)
        );

        return Ok(());
    }

    fn apply_toml(toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for (name, item) in doc.iter() {
            let Some(key) = ConfigKey::iter().find(|key| key.to_string() == name) else {
                log::warn!("config.toml: ignoring unknown key '{}'", name);
                continue;
            };

            let val = match item {
                Item::Value(Value::Integer(val)) => val.value().to_string(),
                Item::Value(Value::String(val)) => val.value().to_string(),
                _ => bail!("config.toml: '{key}' must be a string or an integer"),
            };
            Config::validate(key, &val)?;
            Config::set(key, &val);
        }

        return Ok(());
    }

    fn validate(key: ConfigKey, val: &str) -> Result<()> {
        let valid = match key {
            ConfigKey::Countdown => val.parse::<u32>().is_ok(),
            ConfigKey::Navigation => NavigationPolicy::from_str(val).is_ok(),
            _ => true,
        };
        if !valid {
            bail!("config.toml has an invalid value for key '{key}': {val}");
        }

        return Ok(());
    }

    fn flag(matches: &ArgMatches, key: ConfigKey) -> Option<String> {
        let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) else {
            return None;
        };
        if val.is_empty() {
            return None;
        }

        return Some(val.to_string());
    }

    /// A commented `config.toml` holding every default except its own path.
    pub fn serialize_default() -> String {
        return ConfigKey::iter()
            .filter(|key| *key != ConfigKey::ConfigFile)
            .map(|key| {
                let default = Config::default(key);
                let val = match default.parse::<i64>() {
                    Ok(num) => Value::from(num),
                    Err(_) => Value::from(default),
                };

                let mut description = key.description().to_string();
                if key == ConfigKey::Navigation {
                    description = format!("{description} [possible values: {NAVIGATION_VALUES}]");
                }

                return format!("# {description}\n{key} = {val}");
            })
            .collect::<Vec<String>>()
            .join("\n\n");
    }
}
