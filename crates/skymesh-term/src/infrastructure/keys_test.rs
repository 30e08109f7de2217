use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;

use super::KeySource;
use super::ScriptedKeys;
use crate::domain::models::Key;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    return KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    };
}

#[test]
fn it_maps_crossterm_keys() {
    assert_eq!(
        Key::from_crossterm(press(KeyCode::Up, KeyModifiers::NONE)),
        Some(Key::Up)
    );
    assert_eq!(
        Key::from_crossterm(press(KeyCode::Char('x'), KeyModifiers::SHIFT)),
        Some(Key::Char('x'))
    );
    assert_eq!(
        Key::from_crossterm(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Key::Other)
    );
    assert_eq!(
        Key::from_crossterm(press(KeyCode::F(1), KeyModifiers::NONE)),
        Some(Key::Other)
    );
}

#[test]
fn it_skips_key_releases() {
    let mut event = press(KeyCode::Enter, KeyModifiers::NONE);
    event.kind = KeyEventKind::Release;

    assert_eq!(Key::from_crossterm(event), None);
}

#[tokio::test]
async fn it_replays_scripted_keys_then_fails() {
    let mut keys = ScriptedKeys::new(vec![Key::Down, Key::Enter]);

    assert_eq!(keys.next_key().await.unwrap(), Key::Down);
    assert_eq!(keys.next_key().await.unwrap(), Key::Enter);
    assert!(keys.next_key().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn it_blocks_when_a_blocking_script_runs_out() {
    let mut keys = ScriptedKeys::blocking(vec![]);
    let res = tokio::time::timeout(std::time::Duration::from_secs(5), keys.next_key()).await;

    assert!(res.is_err());
}
