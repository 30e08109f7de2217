use ratatui::backend::TestBackend;

use super::LineEditor;
use crate::domain::models::DisplayOption;
use crate::domain::models::Key;
use crate::domain::models::LineInput;
use crate::domain::services::Drawer;
use crate::infrastructure::canvas::TerminalCanvas;
use crate::infrastructure::keys::ScriptedKeys;

fn drawer() -> Drawer<TerminalCanvas<TestBackend>> {
    return Drawer::new(TerminalCanvas::new(TestBackend::new(40, 4)).unwrap());
}

fn row_text(drawer: &Drawer<TerminalCanvas<TestBackend>>, y: u16) -> String {
    let buffer = drawer.canvas().backend().buffer();
    return (0..buffer.area.width)
        .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
        .collect::<String>()
        .trim_end()
        .to_string();
}

fn script(keys: &[Key]) -> ScriptedKeys {
    return ScriptedKeys::new(keys.to_vec());
}

#[tokio::test]
async fn it_returns_text_after_backspace() {
    let mut drawer = drawer();
    let mut keys = script(&[
        Key::Char('a'),
        Key::Char('b'),
        Key::Char('c'),
        Key::Backspace,
        Key::Enter,
    ]);

    let res = LineEditor::new("Name: ")
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(res, LineInput::Submitted("ab".to_string()));
    assert_eq!(row_text(&drawer, 0), "Name: ab");
    assert_eq!(drawer.row(), 1);
}

#[tokio::test]
async fn it_cancels_on_escape() {
    let mut drawer = drawer();
    let mut keys = script(&[Key::Char('x'), Key::Esc]);

    let res = LineEditor::new("Name: ")
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(res, LineInput::Cancelled);
    assert_eq!(drawer.row(), 0);
}

#[tokio::test]
async fn it_submits_an_empty_line() {
    let mut drawer = drawer();
    let mut keys = script(&[Key::Enter]);

    let res = LineEditor::new("> ")
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(res, LineInput::Submitted("".to_string()));
}

#[tokio::test]
async fn it_does_not_erase_the_prompt() {
    let mut drawer = drawer();
    let mut keys = script(&[Key::Backspace, Key::Backspace, Key::Char('z'), Key::Enter]);

    let res = LineEditor::new("> ")
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(res, LineInput::Submitted("z".to_string()));
    assert_eq!(row_text(&drawer, 0), "> z");
}

#[tokio::test]
async fn it_ignores_navigation_keys() {
    let mut drawer = drawer();
    let mut keys = script(&[
        Key::Char('o'),
        Key::Left,
        Key::Up,
        Key::Other,
        Key::Char('k'),
        Key::Enter,
    ]);

    let res = LineEditor::new("")
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(res, LineInput::Submitted("ok".to_string()));
}

#[tokio::test]
async fn it_echoes_the_mask_but_returns_the_text() {
    let mut drawer = drawer();
    let mut keys = ScriptedKeys::new(
        ScriptedKeys::typed("hunter2")
            .into_iter()
            .chain([Key::Enter]),
    );

    let res = LineEditor::new("Password: ")
        .masked('*')
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(res, LineInput::Submitted("hunter2".to_string()));
    assert_eq!(row_text(&drawer, 0), "Password: *******");
}

#[tokio::test]
async fn it_draws_on_the_current_row() {
    let mut drawer = drawer();
    drawer.print("header", DisplayOption::DEFAULT).unwrap();
    let mut keys = script(&[Key::Char('q'), Key::Enter]);

    LineEditor::new("? ")
        .read_line(&mut drawer, &mut keys)
        .await
        .unwrap();

    assert_eq!(row_text(&drawer, 0), "header");
    assert_eq!(row_text(&drawer, 1), "? q");
    assert_eq!(drawer.row(), 2);
}
