use ratatui::style::Color;

/// Per-call drawing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOption {
    /// Move to the next row after the last printed line.
    pub advance_line: bool,
    /// Flush the canvas before returning.
    pub flush: bool,
    pub fg: Color,
    pub bg: Color,
}

impl DisplayOption {
    /// Advances the line and flushes immediately.
    pub const DEFAULT: DisplayOption = DisplayOption {
        advance_line: true,
        flush: true,
        fg: Color::Reset,
        bg: Color::Reset,
    };

    /// Advances the line but leaves the writes batched until the next flush.
    pub const NO_FLUSH: DisplayOption = DisplayOption {
        advance_line: true,
        flush: false,
        fg: Color::Reset,
        bg: Color::Reset,
    };

    pub fn with_advance_line(mut self, advance_line: bool) -> DisplayOption {
        self.advance_line = advance_line;
        return self;
    }
}

impl Default for DisplayOption {
    fn default() -> DisplayOption {
        return DisplayOption::DEFAULT;
    }
}
