#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;

use std::io;

use anyhow::bail;
use anyhow::Result;
use strum::Display;
use strum::EnumString;

use super::Drawer;
use crate::domain::models::DisplayOption;
use crate::domain::models::Key;
use crate::infrastructure::canvas::Canvas;
use crate::infrastructure::keys::KeySource;

const SELECTED_MARKER: &str = ">  ";

/// What the arrow keys do at either end of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NavigationPolicy {
    /// Moving past an end continues from the other end.
    #[default]
    Wrap,
    /// Moving past an end stays on it.
    Clamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Displaying,
    AwaitingKey,
    Confirmed(usize),
}

/// Vertical list of labels with one highlighted entry.
///
/// One entry is the quit entry that Escape jumps to. It is the last one unless
/// set otherwise.
pub struct SelectableMenu {
    options: Vec<String>,
    title: Option<String>,
    selected: usize,
    quit_index: usize,
    policy: NavigationPolicy,
    state: MenuState,
}

impl SelectableMenu {
    pub fn new(options: Vec<String>) -> SelectableMenu {
        let quit_index = options.len().saturating_sub(1);
        return SelectableMenu {
            options,
            title: None,
            selected: 0,
            quit_index,
            policy: NavigationPolicy::default(),
            state: MenuState::Displaying,
        };
    }

    pub fn with_title(mut self, title: &str) -> SelectableMenu {
        self.title = Some(title.to_string());
        return self;
    }

    pub fn with_quit_index(mut self, quit_index: usize) -> SelectableMenu {
        self.quit_index = quit_index.min(self.options.len().saturating_sub(1));
        return self;
    }

    pub fn with_policy(mut self, policy: NavigationPolicy) -> SelectableMenu {
        self.policy = policy;
        return self;
    }

    pub fn selected(&self) -> usize {
        return self.selected;
    }

    pub fn quit_index(&self) -> usize {
        return self.quit_index;
    }

    pub fn state(&self) -> MenuState {
        return self.state;
    }

    /// Applies one key. Returns the confirmed index on Enter or Escape.
    pub fn handle_key(&mut self, key: Key) -> Option<usize> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }

        match key {
            Key::Up => {
                self.selected = match self.policy {
                    NavigationPolicy::Wrap => (self.selected + len - 1) % len,
                    NavigationPolicy::Clamp => self.selected.saturating_sub(1),
                };
                self.state = MenuState::Displaying;
            }
            Key::Down => {
                self.selected = match self.policy {
                    NavigationPolicy::Wrap => (self.selected + 1) % len,
                    NavigationPolicy::Clamp => (self.selected + 1).min(len - 1),
                };
                self.state = MenuState::Displaying;
            }
            Key::Enter => {
                self.state = MenuState::Confirmed(self.selected);
                return Some(self.selected);
            }
            Key::Esc => {
                self.selected = self.quit_index;
                self.state = MenuState::Confirmed(self.quit_index);
                return Some(self.quit_index);
            }
            _ => {}
        }

        return None;
    }

    /// Redraws the whole menu from the top of a cleared screen, then flushes
    /// once.
    pub fn render<C: Canvas>(&self, drawer: &mut Drawer<C>) -> io::Result<()> {
        drawer.clear(DisplayOption::NO_FLUSH)?;
        if let Some(title) = &self.title {
            drawer.print(title, DisplayOption::NO_FLUSH)?;
        }

        for (i, option) in self.options.iter().enumerate() {
            if i == self.selected {
                drawer.print(
                    &format!("{SELECTED_MARKER}{option}"),
                    DisplayOption::NO_FLUSH,
                )?;
            } else {
                drawer.print(option, DisplayOption::NO_FLUSH)?;
            }
        }

        return drawer.flush();
    }

    /// Runs until an entry is confirmed and returns its index. The selection
    /// starts at the first entry on every call.
    pub async fn run<C: Canvas, K: KeySource + ?Sized>(
        &mut self,
        drawer: &mut Drawer<C>,
        keys: &mut K,
    ) -> Result<usize> {
        if self.options.is_empty() {
            bail!("menu has no options");
        }

        self.selected = 0;
        self.state = MenuState::Displaying;

        loop {
            if self.state == MenuState::Displaying {
                self.render(drawer)?;
                self.state = MenuState::AwaitingKey;
            }

            let key = keys.next_key().await?;
            if let Some(index) = self.handle_key(key) {
                log::debug!("menu confirmed {} ({:?})", index, self.options.get(index));
                return Ok(index);
            }
        }
    }
}
