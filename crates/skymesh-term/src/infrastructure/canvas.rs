#[cfg(test)]
#[path = "canvas_test.rs"]
mod tests;

use std::io;

use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::layout::Size;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Terminal;

/// Character grid the drawer writes into.
///
/// Writes are batched in a back buffer that survives flushes; `flush` makes
/// the pending state visible on the terminal.
pub trait Canvas {
    /// Sets one cell. Positions outside the canvas are ignored.
    fn set_cell(&mut self, x: u16, y: u16, ch: char, fg: Color, bg: Color);
    /// Blanks every cell using the given colors.
    fn clear(&mut self, fg: Color, bg: Color);
    fn flush(&mut self) -> io::Result<()>;
    fn size(&self) -> Size;
}

/// `Canvas` over any ratatui backend. Crossterm for real sessions, `TestBackend`
/// in tests.
pub struct TerminalCanvas<B: Backend> {
    terminal: Terminal<B>,
    cells: Buffer,
}

impl<B: Backend> TerminalCanvas<B> {
    pub fn new(backend: B) -> io::Result<TerminalCanvas<B>> {
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        let cells = Buffer::empty(Rect::new(0, 0, size.width, size.height));

        return Ok(TerminalCanvas { terminal, cells });
    }

    pub fn backend(&self) -> &B {
        return self.terminal.backend();
    }

    pub fn backend_mut(&mut self) -> &mut B {
        return self.terminal.backend_mut();
    }

    /// Grows or shrinks the back buffer to the terminal, keeping the
    /// overlapping cells.
    fn sync_area(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        if self.cells.area.width == size.width && self.cells.area.height == size.height {
            return Ok(());
        }

        let mut resized = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        let overlap = resized.area.intersection(self.cells.area);
        for y in overlap.top()..overlap.bottom() {
            for x in overlap.left()..overlap.right() {
                if let (Some(src), Some(dst)) = (self.cells.cell((x, y)), resized.cell_mut((x, y)))
                {
                    *dst = src.clone();
                }
            }
        }
        self.cells = resized;

        return Ok(());
    }
}

impl<B: Backend> Canvas for TerminalCanvas<B> {
    fn set_cell(&mut self, x: u16, y: u16, ch: char, fg: Color, bg: Color) {
        if let Some(cell) = self.cells.cell_mut((x, y)) {
            cell.set_char(ch).set_fg(fg).set_bg(bg);
        }
    }

    fn clear(&mut self, fg: Color, bg: Color) {
        self.cells.reset();
        let area = self.cells.area;
        self.cells.set_style(area, Style::default().fg(fg).bg(bg));
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync_area()?;
        let cells = &self.cells;
        self.terminal
            .draw(|frame| frame.render_widget(CellLayer(cells), frame.area()))?;

        return Ok(());
    }

    fn size(&self) -> Size {
        return self.cells.area.as_size();
    }
}

struct CellLayer<'a>(&'a Buffer);

impl Widget for CellLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(self.0.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.0.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}
