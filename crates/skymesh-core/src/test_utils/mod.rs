pub mod recording_runner;

pub use recording_runner::*;
