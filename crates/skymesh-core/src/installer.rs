//! Fetches and runs the platform installer for the mesh client.
//!
//! Downloading and running are separate steps so the caller can draw progress
//! between them.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::download::{Download, Downloader};
use crate::errors::{Result, SkymeshError};
use crate::tool::CommandRunner;

pub const DEFAULT_INSTALLER_URL: &str =
    "https://pkgs.tailscale.com/stable/tailscale-setup-latest.exe";
pub const DEFAULT_INSTALL_SCRIPT_URL: &str = "https://tailscale.com/install.sh";

const TEMP_DIR_PREFIX: &str = "skymesh-installer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    /// Self-installing executable run with `--install`.
    Windows,
    /// Shell script piped into `sh`.
    Linux,
    Unsupported(String),
}

impl InstallTarget {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => InstallTarget::Windows,
            "linux" => InstallTarget::Linux,
            other => InstallTarget::Unsupported(other.to_string()),
        }
    }

    fn artifact_name(&self) -> Result<&'static str> {
        match self {
            InstallTarget::Windows => Ok("tailscale-setup-latest.exe"),
            InstallTarget::Linux => Ok("install.sh"),
            InstallTarget::Unsupported(os) => Err(SkymeshError::PlatformNotSupported(os.clone())),
        }
    }
}

pub struct Installer {
    target: InstallTarget,
    installer_url: String,
    script_url: String,
    downloader: Downloader,
    runner: Arc<dyn CommandRunner>,
}

impl Installer {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            target: InstallTarget::current(),
            installer_url: DEFAULT_INSTALLER_URL.to_string(),
            script_url: DEFAULT_INSTALL_SCRIPT_URL.to_string(),
            downloader: Downloader::new(),
            runner,
        }
    }

    pub fn with_target(mut self, target: InstallTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_installer_url(mut self, url: impl Into<String>) -> Self {
        self.installer_url = url.into();
        self
    }

    pub fn with_script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }

    /// Scratch directory for the artifact. Removed when dropped.
    pub fn temp_dir(&self) -> Result<TempDir> {
        let dir = tempfile::Builder::new().prefix(TEMP_DIR_PREFIX).tempdir()?;
        log::debug!("created {}", dir.path().display());
        Ok(dir)
    }

    /// Where the artifact is saved inside `dir`.
    pub fn artifact_path(&self, dir: &Path) -> Result<PathBuf> {
        Ok(dir.join(self.target.artifact_name()?))
    }

    /// Starts downloading the artifact for the current target.
    pub async fn fetch(&self) -> Result<Download> {
        let url = match self.target {
            InstallTarget::Windows => &self.installer_url,
            InstallTarget::Linux => &self.script_url,
            InstallTarget::Unsupported(ref os) => {
                return Err(SkymeshError::PlatformNotSupported(os.clone()))
            }
        };
        self.downloader.fetch(url).await
    }

    /// Runs a saved artifact with output passed through to the terminal.
    pub async fn run(&self, artifact: &Path) -> Result<()> {
        let output = match self.target {
            InstallTarget::Windows => {
                let program = artifact.to_string_lossy();
                self.runner
                    .status(&program, &["--install".to_string()], None)
                    .await?
            }
            InstallTarget::Linux => {
                let script = tokio::fs::read(artifact).await?;
                self.runner.status("sh", &[], Some(script)).await?
            }
            InstallTarget::Unsupported(ref os) => {
                return Err(SkymeshError::PlatformNotSupported(os.clone()))
            }
        };

        if !output.success {
            return Err(SkymeshError::InstallerFailed(output.status));
        }
        log::info!("installer finished: {}", output.status);
        Ok(())
    }
}

#[cfg(test)]
#[path = "installer_test.rs"]
mod tests;
