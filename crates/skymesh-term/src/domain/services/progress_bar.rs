#[cfg(test)]
#[path = "progress_bar_test.rs"]
mod tests;

use std::io;

use ratatui::style::Color;

use super::Drawer;
use crate::domain::models::DisplayOption;
use crate::infrastructure::canvas::Canvas;

/// Widest percentage text the bar leaves room for.
pub const PROGRESS_SUFFIX: &str = " 100/100";
/// Columns taken by the two boundary glyphs.
const BOUNDARY_WIDTH: u16 = 2;

const BOUNDARY: char = '|';
const FILLED: char = '=';
const EMPTY: char = '-';

/// Integer percentage of `transferred` over `total`, floored and clamped to
/// 0..=100. An empty total counts as complete.
pub fn percent(transferred: u64, total: u64) -> u16 {
    if total == 0 {
        return 100;
    }

    let pct = (transferred as u128 * 100) / total as u128;
    return pct.min(100) as u16;
}

/// Completion bar pinned to the row that was current when it was created.
pub struct ProgressBar {
    total_bytes: u64,
    row: u16,
    option: DisplayOption,
}

impl ProgressBar {
    /// Claims the drawer's current row for the lifetime of the bar.
    pub fn new<C: Canvas>(drawer: &mut Drawer<C>, total_bytes: u64) -> ProgressBar {
        return ProgressBar {
            total_bytes,
            row: drawer.reserve_row(),
            option: DisplayOption::DEFAULT,
        };
    }

    pub fn with_option(mut self, option: DisplayOption) -> ProgressBar {
        self.option = option;
        return self;
    }

    pub fn row(&self) -> u16 {
        return self.row;
    }

    pub fn total_bytes(&self) -> u64 {
        return self.total_bytes;
    }

    pub fn percent(&self, transferred: u64) -> u16 {
        return percent(transferred, self.total_bytes);
    }

    /// Redraws the whole row from `transferred` alone, so repeating a value
    /// repaints identical cells.
    pub fn update<C: Canvas>(&self, drawer: &mut Drawer<C>, transferred: u64) -> io::Result<()> {
        let pct = self.percent(transferred);
        let width = drawer.size().width;
        let bar_width = width
            .saturating_sub(PROGRESS_SUFFIX.len() as u16)
            .saturating_sub(BOUNDARY_WIDTH);
        let filled = (bar_width as u32 * pct as u32 / 100) as u16;
        let bg = self.option.bg;

        drawer.put_char(self.row, 0, BOUNDARY, Color::White, bg);
        for i in 0..bar_width {
            if i < filled {
                drawer.put_char(self.row, i + 1, FILLED, Color::Green, bg);
            } else {
                drawer.put_char(self.row, i + 1, EMPTY, self.option.fg, bg);
            }
        }
        drawer.put_char(self.row, bar_width + 1, BOUNDARY, Color::White, bg);
        let label = format!("{:<width$}", format!(" {pct}/100"), width = PROGRESS_SUFFIX.len());
        drawer.put_str(self.row, bar_width + 2, &label, Color::White, bg);

        if self.option.flush {
            drawer.flush()?;
        }

        return Ok(());
    }
}
