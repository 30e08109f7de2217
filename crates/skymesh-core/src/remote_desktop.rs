//! Launches the Windows Remote Desktop client.

use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::{Result, SkymeshError};
use crate::installer::InstallTarget;
use crate::tool::CommandRunner;

pub const MSTSC_PATH: &str = r"C:\WINDOWS\system32\mstsc.exe";

pub struct RemoteDesktop {
    target: InstallTarget,
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl RemoteDesktop {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            target: InstallTarget::current(),
            executable: PathBuf::from(MSTSC_PATH),
            runner,
        }
    }

    pub fn with_target(mut self, target: InstallTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Starts the client without waiting for it to exit.
    pub async fn open(&self) -> Result<()> {
        if self.target != InstallTarget::Windows {
            return Err(SkymeshError::PlatformNotSupported(
                "mstsc.exe requires Windows".to_string(),
            ));
        }
        if !self.executable.exists() {
            return Err(SkymeshError::ToolMissing {
                tool: "mstsc.exe".to_string(),
                reason: "please install Remote Desktop Connection".to_string(),
            });
        }

        let program = self.executable.to_string_lossy();
        self.runner.spawn(&program, &[]).await?;
        log::info!("started {}", program);
        Ok(())
    }
}

#[cfg(test)]
#[path = "remote_desktop_test.rs"]
mod tests;
