//! Error types for everything skymesh does outside the terminal.
//!
//! Each variant names where the failure came from so the UI can report it
//! inline and carry on; none of them is fatal on its own.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkymeshError {
    #[error("no subcommand provided")]
    MissingSubcommand,

    #[error("invalid subcommand: {0}")]
    InvalidSubcommand(String),

    #[error("command execution failed: {status}\n{output}")]
    CommandFailed { status: String, output: String },

    #[error("{tool} is not installed: {reason}")]
    ToolMissing { tool: String, reason: String },

    #[error("I/O error: {message}")]
    IoError { message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Unable to get file size")]
    UnknownContentLength,

    #[error("login failed with status: {0}")]
    LoginRejected(u16),

    #[error("Installer failed: {0}")]
    InstallerFailed(String),

    #[error("Platform not supported: {0}")]
    PlatformNotSupported(String),
}

impl From<std::io::Error> for SkymeshError {
    fn from(err: std::io::Error) -> Self {
        SkymeshError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for SkymeshError {
    fn from(err: reqwest::Error) -> Self {
        SkymeshError::NetworkError {
            message: err.to_string(),
        }
    }
}

/// Result type for skymesh-core operations
pub type Result<T> = std::result::Result<T, SkymeshError>;
