mod display_option;
mod key;
mod line_input;
mod screen_cursor;

pub use display_option::*;
pub use key::*;
pub use line_input::*;
pub use screen_cursor::*;
