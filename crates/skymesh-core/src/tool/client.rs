use std::sync::Arc;

use crate::accounts::AccountSet;
use crate::errors::{Result, SkymeshError};
use crate::tool::runner::{CommandOutput, CommandRunner};
use crate::tool::subcommand::Subcommand;

/// Marker printed by `--version` of a genuine build.
pub const VERSION_MARKER: &str = "go version";

/// Forwards allow-listed subcommands to the mesh client binary.
#[derive(Clone)]
pub struct MeshCli {
    binary: String,
    runner: Arc<dyn CommandRunner>,
}

impl MeshCli {
    pub fn new(binary: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    /// Runs `--version` and returns its output when the binary is usable.
    pub async fn probe(&self) -> Result<String> {
        let args = vec!["--version".to_string()];
        let output = self
            .runner
            .output(&self.binary, &args)
            .await
            .map_err(|e| SkymeshError::ToolMissing {
                tool: self.binary.clone(),
                reason: e.to_string(),
            })?;

        if !output.text.contains(VERSION_MARKER) {
            return Err(SkymeshError::ToolMissing {
                tool: self.binary.clone(),
                reason: format!("unexpected version output: {}", output.text.trim()),
            });
        }

        Ok(output.text)
    }

    /// Runs `args` where `args[0]` must be an allow-listed subcommand.
    /// Returns the combined output of a zero exit.
    pub async fn execute(&self, args: &[&str]) -> Result<String> {
        let Some(first) = args.first() else {
            return Err(SkymeshError::MissingSubcommand);
        };
        let subcommand = Subcommand::parse(first)?;
        log::info!("{} {}", self.binary, args.join(" "));

        let argv: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let output = self.runner.output(&self.binary, &argv).await?;
        Self::check(subcommand, output)
    }

    pub async fn status(&self) -> Result<String> {
        self.execute(&["status"]).await
    }

    pub async fn ip(&self) -> Result<String> {
        self.execute(&["ip"]).await
    }

    pub async fn logout(&self) -> Result<String> {
        self.execute(&["logout"]).await
    }

    pub async fn switch_account(&self, account: &str) -> Result<String> {
        self.execute(&["switch", account]).await
    }

    pub async fn login_with_key(&self, key: &str) -> Result<String> {
        self.execute(&["login", "--authkey", key]).await
    }

    /// Decodes `switch --list`. A failed listing is an error; an unreadable
    /// table is just empty.
    pub async fn list_accounts(&self) -> Result<AccountSet> {
        let table = self.execute(&["switch", "--list"]).await?;
        Ok(AccountSet::parse(&table))
    }

    fn check(subcommand: Subcommand, output: CommandOutput) -> Result<String> {
        if !output.success {
            log::warn!("{} failed: {}", subcommand, output.status);
            return Err(SkymeshError::CommandFailed {
                status: output.status,
                output: output.text,
            });
        }
        Ok(output.text)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
