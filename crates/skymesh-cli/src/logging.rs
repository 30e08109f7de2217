use std::fs::OpenOptions;

use anyhow::Context;
use anyhow::Result;
use log::LevelFilter;

/// Trace mode writes everything here instead of the configured log file.
pub const TRACE_FILE: &str = "trace.out";

/// Picks the log destination and level. Trace mode overrides both.
pub fn target(log_file: &str, log_level: &str, trace: bool) -> (String, LevelFilter) {
    if trace {
        return (TRACE_FILE.to_string(), LevelFilter::Trace);
    }
    let level = log_level.parse().unwrap_or(LevelFilter::Info);
    return (log_file.to_string(), level);
}

/// Sends log output to a file so it never lands on the UI.
pub fn init(log_file: &str, log_level: &str, trace: bool) -> Result<()> {
    let (path, level) = target(log_file, log_level, trace);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to create {path}"))?;

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    log::info!("logging to {} at {}", path, level);
    return Ok(());
}
