use ratatui::backend::TestBackend;
use ratatui::style::Color;

use super::Canvas;
use super::TerminalCanvas;

fn row_text(canvas: &TerminalCanvas<TestBackend>, y: u16) -> String {
    let buffer = canvas.backend().buffer();
    return (0..buffer.area.width)
        .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
        .collect::<String>();
}

#[test]
fn it_only_shows_cells_after_flush() {
    let mut canvas = TerminalCanvas::new(TestBackend::new(8, 2)).unwrap();
    canvas.set_cell(0, 0, 'h', Color::Reset, Color::Reset);
    canvas.set_cell(1, 0, 'i', Color::Reset, Color::Reset);
    assert_eq!(row_text(&canvas, 0), "        ");

    canvas.flush().unwrap();
    assert_eq!(row_text(&canvas, 0), "hi      ");
}

#[test]
fn it_keeps_pending_cells_across_flushes() {
    let mut canvas = TerminalCanvas::new(TestBackend::new(4, 1)).unwrap();
    canvas.set_cell(0, 0, 'a', Color::Reset, Color::Reset);
    canvas.flush().unwrap();
    canvas.set_cell(1, 0, 'b', Color::Reset, Color::Reset);
    canvas.flush().unwrap();

    assert_eq!(row_text(&canvas, 0), "ab  ");
}

#[test]
fn it_ignores_cells_outside_the_grid() {
    let mut canvas = TerminalCanvas::new(TestBackend::new(3, 1)).unwrap();
    canvas.set_cell(5, 0, 'x', Color::Reset, Color::Reset);
    canvas.set_cell(0, 4, 'y', Color::Reset, Color::Reset);
    canvas.flush().unwrap();

    assert_eq!(row_text(&canvas, 0), "   ");
}

#[test]
fn it_clears_every_cell() {
    let mut canvas = TerminalCanvas::new(TestBackend::new(3, 2)).unwrap();
    canvas.set_cell(0, 0, 'a', Color::Reset, Color::Reset);
    canvas.set_cell(2, 1, 'b', Color::Reset, Color::Reset);
    canvas.flush().unwrap();

    canvas.clear(Color::Reset, Color::Reset);
    canvas.flush().unwrap();

    assert_eq!(row_text(&canvas, 0), "   ");
    assert_eq!(row_text(&canvas, 1), "   ");
}

#[test]
fn it_records_cell_colors() {
    let mut canvas = TerminalCanvas::new(TestBackend::new(2, 1)).unwrap();
    canvas.set_cell(0, 0, '=', Color::Green, Color::Reset);
    canvas.flush().unwrap();

    let cell = canvas.backend().buffer().cell((0, 0)).unwrap().clone();
    assert_eq!(cell.fg, Color::Green);
}

#[test]
fn it_follows_terminal_resizes_on_flush() {
    let mut canvas = TerminalCanvas::new(TestBackend::new(4, 1)).unwrap();
    canvas.set_cell(0, 0, 'k', Color::Reset, Color::Reset);
    canvas.backend_mut().resize(6, 2);
    canvas.flush().unwrap();

    assert_eq!(canvas.size().width, 6);
    assert_eq!(canvas.size().height, 2);
    assert_eq!(row_text(&canvas, 0), "k     ");
}
