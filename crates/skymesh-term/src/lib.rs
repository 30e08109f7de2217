//! Terminal user interface core for skymesh.
//!
//! This crate owns everything that touches the screen: a cell canvas backed by
//! ratatui, a cursor-tracked writer that every other component draws through,
//! the progress bar used while downloading, a single-line editor for credential
//! prompts and the selectable menu that drives the application.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub use application::terminal::{destruct_terminal_for_panic, init_terminal, restore_terminal};
pub use domain::models::{DisplayOption, Key, LineInput, ScreenCursor};
pub use domain::services::{
    wait_for_key_or_timeout, CountdownOutcome, Drawer, LineEditor, MenuState, NavigationPolicy,
    ProgressBar, SelectableMenu,
};
pub use infrastructure::canvas::{Canvas, TerminalCanvas};
pub use infrastructure::keys::{CrosstermKeys, KeySource, ScriptedKeys};
