//! Wrapper around the external mesh client executable.
//!
//! Only allow-listed subcommands are forwarded. Processes are started through
//! a `CommandRunner` so the wrapper can be exercised without the real binary.

pub mod client;
pub mod runner;
pub mod subcommand;

pub use client::*;
pub use runner::*;
pub use subcommand::*;
