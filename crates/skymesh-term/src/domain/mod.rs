//! Drawing state and interaction logic for the terminal interface.
//!
//! Everything here talks to the screen through the `Canvas` trait and reads
//! keys through `KeySource`, so it runs the same against a real terminal or a
//! test backend.

pub mod models;
pub mod services;
