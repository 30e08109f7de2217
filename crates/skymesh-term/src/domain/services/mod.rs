mod countdown;
mod drawer;
mod line_editor;
mod menu;
mod progress_bar;

pub use countdown::*;
pub use drawer::*;
pub use line_editor::*;
pub use menu::*;
pub use progress_bar::*;
