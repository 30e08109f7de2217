#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;

use std::collections::VecDeque;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use futures_util::StreamExt;

use crate::domain::models::Key;

/// Blocking source of key presses. There is no timeout on `next_key`;
/// callers that need one race it against a timer.
#[async_trait]
pub trait KeySource: Send {
    async fn next_key(&mut self) -> Result<Key>;
}

pub struct CrosstermKeys {
    events: EventStream,
}

impl CrosstermKeys {
    pub fn new() -> CrosstermKeys {
        return CrosstermKeys {
            events: EventStream::new(),
        };
    }
}

impl Default for CrosstermKeys {
    fn default() -> CrosstermKeys {
        return CrosstermKeys::new();
    }
}

#[async_trait]
impl KeySource for CrosstermKeys {
    async fn next_key(&mut self) -> Result<Key> {
        loop {
            match self.events.next().await {
                Some(Ok(CrosstermEvent::Key(event))) => {
                    if let Some(key) = Key::from_crossterm(event) {
                        log::trace!("key {:?}", key);
                        return Ok(key);
                    }
                }
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err.into()),
                None => bail!("terminal event stream closed"),
            }
        }
    }
}

/// Replays a fixed list of keys.
///
/// Once the list runs out it either fails, or with `blocking` never returns,
/// which stands in for a user who walked away.
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
    block_when_empty: bool,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> ScriptedKeys {
        return ScriptedKeys {
            keys: keys.into_iter().collect(),
            block_when_empty: false,
        };
    }

    pub fn blocking<I: IntoIterator<Item = Key>>(keys: I) -> ScriptedKeys {
        return ScriptedKeys {
            keys: keys.into_iter().collect(),
            block_when_empty: true,
        };
    }

    /// Types each character of `text`.
    pub fn typed(text: &str) -> Vec<Key> {
        return text.chars().map(Key::Char).collect();
    }

    pub fn remaining(&self) -> usize {
        return self.keys.len();
    }
}

#[async_trait]
impl KeySource for ScriptedKeys {
    async fn next_key(&mut self) -> Result<Key> {
        if let Some(key) = self.keys.pop_front() {
            return Ok(key);
        }

        if self.block_when_empty {
            std::future::pending::<()>().await;
        }

        bail!("key script exhausted")
    }
}
