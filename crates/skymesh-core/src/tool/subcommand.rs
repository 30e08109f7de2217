use std::str::FromStr;

use strum::AsRefStr;
use strum::Display;
use strum::EnumIter;
use strum::EnumString;

use crate::errors::SkymeshError;

/// Subcommands that may be forwarded to the mesh client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Subcommand {
    Up,
    Down,
    Set,
    Login,
    Logout,
    Switch,
    Configure,
    Netcheck,
    Ip,
    Status,
    Ping,
    Nc,
    Ssh,
    Funnel,
    Serve,
    Version,
    Web,
    File,
    Bugreport,
    Cert,
    Lock,
    Licenses,
    ExitNode,
    Update,
}

impl Subcommand {
    /// Checks `name` against the allow-list.
    pub fn parse(name: &str) -> Result<Subcommand, SkymeshError> {
        Subcommand::from_str(name).map_err(|_| SkymeshError::InvalidSubcommand(name.to_string()))
    }
}
