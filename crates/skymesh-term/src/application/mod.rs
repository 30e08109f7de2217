//! Session-level terminal handling: entering and leaving the raw alternate
//! screen the canvas draws on.

pub mod terminal;
