#[cfg(test)]
#[path = "drawer_test.rs"]
mod tests;

use std::io;

use ratatui::layout::Size;
use ratatui::style::Color;

use crate::domain::models::DisplayOption;
use crate::domain::models::ScreenCursor;
use crate::infrastructure::canvas::Canvas;

/// Cursor-tracked writer.
///
/// Owns the canvas and the one write head every component draws through. Two
/// multi-line prints that are not separated by a `clear` share that head, so
/// the order of calls decides the layout.
pub struct Drawer<C: Canvas> {
    canvas: C,
    cursor: ScreenCursor,
    left_margin: u16,
}

impl<C: Canvas> Drawer<C> {
    pub fn new(canvas: C) -> Drawer<C> {
        return Drawer::with_left_margin(canvas, 0);
    }

    pub fn with_left_margin(canvas: C, left_margin: u16) -> Drawer<C> {
        return Drawer {
            canvas,
            cursor: ScreenCursor::new(left_margin, 0),
            left_margin,
        };
    }

    /// Writes `message` line by line from the cursor. Every line ends with the
    /// column back at the left margin and the row advanced, except that the
    /// last advance is undone when `opt.advance_line` is false.
    pub fn print(&mut self, message: &str, opt: DisplayOption) -> io::Result<()> {
        for line in message.split('\n') {
            for ch in line.chars().filter(|ch| *ch != '\r') {
                self.canvas
                    .set_cell(self.cursor.column, self.cursor.row, ch, opt.fg, opt.bg);
                self.cursor.column = self.cursor.column.saturating_add(1);
            }
            self.cursor.row = self.cursor.row.saturating_add(1);
            self.cursor.column = self.left_margin;
        }

        if !opt.advance_line {
            self.cursor.row = self.cursor.row.saturating_sub(1);
        }

        if opt.flush {
            self.canvas.flush()?;
        }

        return Ok(());
    }

    /// Erases the canvas and homes the cursor to the left margin of row 0.
    pub fn clear(&mut self, opt: DisplayOption) -> io::Result<()> {
        self.cursor = ScreenCursor::new(self.left_margin, 0);
        self.canvas.clear(opt.fg, opt.bg);

        if opt.flush {
            self.canvas.flush()?;
        }

        return Ok(());
    }

    pub fn flush(&mut self) -> io::Result<()> {
        return self.canvas.flush();
    }

    /// Writes `text` at a fixed cell and flushes, leaving the cursor alone.
    /// Used for content that is redrawn in place.
    pub fn render_at(&mut self, row: u16, column: u16, text: &str) -> io::Result<()> {
        self.put_str(row, column, text, Color::Reset, Color::Reset);
        return self.canvas.flush();
    }

    /// Writes `text` at a fixed cell without flushing or moving the cursor.
    pub fn put_str(&mut self, row: u16, column: u16, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let x = column.saturating_add(i as u16);
            self.canvas.set_cell(x, row, ch, fg, bg);
        }
    }

    pub fn put_char(&mut self, row: u16, column: u16, ch: char, fg: Color, bg: Color) {
        self.canvas.set_cell(column, row, ch, fg, bg);
    }

    pub fn next_line(&mut self) {
        self.cursor.row = self.cursor.row.saturating_add(1);
        self.cursor.column = self.left_margin;
    }

    /// Hands out the current row and moves the cursor below it, so later
    /// prints leave the row to its owner.
    pub fn reserve_row(&mut self) -> u16 {
        let row = self.cursor.row;
        self.next_line();
        return row;
    }

    pub fn row(&self) -> u16 {
        return self.cursor.row;
    }

    pub fn column(&self) -> u16 {
        return self.cursor.column;
    }

    pub fn cursor(&self) -> ScreenCursor {
        return self.cursor;
    }

    pub fn left_margin(&self) -> u16 {
        return self.left_margin;
    }

    pub fn size(&self) -> Size {
        return self.canvas.size();
    }

    pub fn canvas(&self) -> &C {
        return &self.canvas;
    }
}
