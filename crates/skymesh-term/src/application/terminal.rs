use std::io;
use std::io::Stdout;

use crossterm::cursor;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;

use crate::infrastructure::canvas::TerminalCanvas;

/// Switches stdout to raw mode on the alternate screen and wraps it in a
/// canvas.
pub fn init_terminal() -> io::Result<TerminalCanvas<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    return TerminalCanvas::new(CrosstermBackend::new(stdout));
}

pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;

    return Ok(());
}

/// Best-effort restore for the panic hook, where errors have nowhere to go.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}
