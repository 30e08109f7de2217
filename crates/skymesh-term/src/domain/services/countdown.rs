#[cfg(test)]
#[path = "countdown_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::time;
use tokio_util::sync::CancellationToken;

use super::Drawer;
use crate::domain::models::DisplayOption;
use crate::domain::models::Key;
use crate::infrastructure::canvas::Canvas;
use crate::infrastructure::keys::KeySource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownOutcome {
    KeyPressed,
    TimedOut,
}

/// Prints `message`, then counts down `seconds` on the row below until either
/// a key arrives or the count reaches zero.
///
/// The key wait and the ticker run side by side and close the same gate; the
/// first one to close it decides the outcome. The screen is cleared afterwards.
/// `verb` fills in "auto {verb} in Ns".
pub async fn wait_for_key_or_timeout<C: Canvas, K: KeySource + ?Sized>(
    drawer: &mut Drawer<C>,
    keys: &mut K,
    message: &str,
    verb: &str,
    seconds: u32,
) -> Result<CountdownOutcome> {
    drawer.print(message, DisplayOption::NO_FLUSH)?;

    let gate = CancellationToken::new();
    let row = drawer.row().saturating_add(1);
    let column = drawer.column();

    let key_wait = async {
        let res: Option<Result<Key>> = tokio::select! {
            key = keys.next_key() => Some(key),
            _ = gate.cancelled() => None,
        };
        gate.cancel();
        res
    };

    let ticker = async {
        let mut interval = time::interval(Duration::from_secs(1));
        interval.tick().await;
        let mut remaining = seconds;

        loop {
            drawer.render_at(
                row,
                column,
                &format!("Press Enter to continue (auto {verb} in {remaining}s)..."),
            )?;
            if remaining == 0 {
                gate.cancel();
                return Ok::<(), std::io::Error>(());
            }

            tokio::select! {
                _ = gate.cancelled() => return Ok(()),
                _ = interval.tick() => {
                    remaining -= 1;
                    if remaining == 0 {
                        gate.cancel();
                        return Ok(());
                    }
                }
            }
        }
    };

    let (key, ticked) = tokio::join!(key_wait, ticker);
    ticked?;

    let outcome = match key {
        Some(Ok(key)) => {
            log::debug!("countdown interrupted by {:?}", key);
            CountdownOutcome::KeyPressed
        }
        Some(Err(err)) => return Err(err),
        None => CountdownOutcome::TimedOut,
    };

    drawer.next_line();
    drawer.clear(DisplayOption::DEFAULT)?;

    return Ok(outcome);
}
