//! Adapters to the physical terminal.
//!
//! The cell canvas wraps a ratatui terminal and the key sources wrap the
//! crossterm event stream, or a fixed script for headless runs.

pub mod canvas;
pub mod keys;
