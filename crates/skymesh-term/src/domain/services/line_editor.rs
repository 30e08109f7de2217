#[cfg(test)]
#[path = "line_editor_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::style::Color;

use super::Drawer;
use crate::domain::models::Key;
use crate::domain::models::LineInput;
use crate::infrastructure::canvas::Canvas;
use crate::infrastructure::keys::KeySource;

/// Single-line prompt drawn in place on the drawer's current row.
///
/// The buffer is append-only: characters go to the end and Backspace removes
/// the last one. Nothing is validated here.
pub struct LineEditor {
    prompt: String,
    mask: Option<char>,
}

impl LineEditor {
    pub fn new(prompt: &str) -> LineEditor {
        return LineEditor {
            prompt: prompt.to_string(),
            mask: None,
        };
    }

    /// Echo every typed character as `mask`. The returned text is unmasked.
    pub fn masked(mut self, mask: char) -> LineEditor {
        self.mask = Some(mask);
        return self;
    }

    pub async fn read_line<C: Canvas, K: KeySource + ?Sized>(
        &self,
        drawer: &mut Drawer<C>,
        keys: &mut K,
    ) -> Result<LineInput> {
        let row = drawer.row();
        let origin = drawer.left_margin();
        let prompt_len = self.prompt.chars().count() as u16;
        let mut text = String::new();
        let mut cursor_column = prompt_len;

        loop {
            drawer.render_at(row, origin, &format!("{}{}", self.prompt, self.echo(&text)))?;

            match keys.next_key().await? {
                Key::Esc => {
                    return Ok(LineInput::Cancelled);
                }
                Key::Enter => {
                    drawer.next_line();
                    return Ok(LineInput::Submitted(text));
                }
                Key::Backspace => {
                    if cursor_column > prompt_len && text.pop().is_some() {
                        cursor_column -= 1;
                        drawer.put_char(
                            row,
                            origin.saturating_add(cursor_column),
                            ' ',
                            Color::Reset,
                            Color::Reset,
                        );
                    }
                }
                Key::Char(ch) => {
                    text.push(ch);
                    cursor_column = cursor_column.saturating_add(1);
                }
                _ => {}
            }
        }
    }

    fn echo(&self, text: &str) -> String {
        return match self.mask {
            Some(mask) => text.chars().map(|_| mask).collect(),
            None => text.to_string(),
        };
    }
}
