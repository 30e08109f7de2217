//! Collaborators that skymesh drives from its menu.
//!
//! The mesh client itself is an opaque executable: this crate validates and
//! forwards subcommands to it, decodes its account table, and fetches and runs
//! its installer when it is missing. The login endpoint that trades
//! credentials for an auth key also lives here.

pub mod accounts;
pub mod download;
pub mod errors;
pub mod installer;
pub mod login;
pub mod remote_desktop;
pub mod test_utils;
pub mod tool;

pub use accounts::AccountSet;
pub use download::{copy_with_progress, Download, Downloader, CHUNK_SIZE};
pub use errors::{Result, SkymeshError};
pub use installer::{InstallTarget, Installer};
pub use login::LoginClient;
pub use remote_desktop::RemoteDesktop;
pub use tool::{CommandOutput, CommandRunner, MeshCli, ProcessRunner, Subcommand};
