use super::*;
use crate::app::{Message, Model, Tuning, update};
use crate::pages::Page;
use crate::ui::viewport::UNITS_PER_ROW;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn draw(model: &Model) -> Buffer {
    let (width, height) = model.terminal_size();
    let mut terminal = create_test_terminal(width, height);
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .filter_map(|x| buffer.cell((x, row)).map(|c| c.symbol().to_string()))
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn model(width: u16, height: u16) -> Model {
    Model::new((width, height), &Tuning::default())
}

#[test]
fn test_status_bar_shows_disconnected_before_link() {
    let model = model(100, 30);
    let buffer = draw(&model);
    let status = row_text(&buffer, 29);
    assert!(status.contains("Backend: Disconnected"), "status: {status}");
    assert!(status.contains("Home (1/4)"), "status: {status}");
}

#[test]
fn test_status_bar_shows_connected_and_toast() {
    let model = update(model(100, 30), Message::Connected);
    let buffer = draw(&model);
    let status = row_text(&buffer, 29);
    assert!(status.contains("Backend: Connected"), "status: {status}");
    assert!(status.contains("Gesture backend connected"), "status: {status}");
}

#[test]
fn test_disconnect_reason_is_shown() {
    let model = update(model(100, 30), Message::Connected);
    let model = update(
        model,
        Message::Disconnected(Some("connection refused".to_string())),
    );
    let status = row_text(&draw(&model), 29);
    assert!(status.contains("Backend: Disconnected"), "status: {status}");
    assert!(status.contains("connection refused"), "status: {status}");
}

#[test]
fn test_nav_shows_brand_and_all_tabs() {
    let buffer = draw(&model(100, 30));
    let nav = row_text(&buffer, 1);
    assert!(nav.contains("RVCE CampusConnect"), "nav: {nav}");
    for title in ["Home", "Admissions", "Departments", "Placements"] {
        assert!(nav.contains(title), "missing tab {title}: {nav}");
    }
}

#[test]
fn test_narrow_terminal_drops_tabs_without_panic() {
    let buffer = draw(&model(30, 10));
    let nav = row_text(&buffer, 1);
    assert!(!nav.contains("Placements"));
}

#[test]
fn test_home_page_content() {
    let text = screen_text(&draw(&model(100, 30)));
    assert!(text.contains("Welcome to RVCE Campus Kiosk"));
    assert!(text.contains("Features"));
    assert!(text.contains("Gesture-based navigation"));
}

#[test]
fn test_admissions_rows_follow_heading() {
    let model = model(100, 30).with_start_page(Page::Admissions.index());
    let buffer = draw(&model);
    let content_top = screen_layout(buffer.area).content.y;
    assert!(row_text(&buffer, content_top).contains("Admissions Dashboard"));
    assert!(row_text(&buffer, content_top + 2).contains("Application ID: RV2025_100 | Status: Verified"));
    assert!(row_text(&buffer, content_top + 21).contains("RV2025_119"));
}

#[test]
fn test_scrolled_content_starts_at_first_visible_row() {
    let model = model(100, 12).with_start_page(Page::Admissions.index());
    let model = update(model, Message::ScrollBy(i64::from(UNITS_PER_ROW) * 2));
    let buffer = draw(&model);
    let content_top = screen_layout(buffer.area).content.y;

    assert!(!screen_text(&buffer).contains("Admissions Dashboard"));
    assert!(row_text(&buffer, content_top).contains("RV2025_100"));
    assert!(row_text(&buffer, content_top + 1).contains("RV2025_101"));
}

#[test]
fn test_partial_row_scroll_keeps_rows_in_place() {
    let model = model(100, 12).with_start_page(Page::Admissions.index());
    let model = update(model, Message::ScrollBy(i64::from(UNITS_PER_ROW) / 2));
    let buffer = draw(&model);
    let content_top = screen_layout(buffer.area).content.y;
    assert!(row_text(&buffer, content_top).contains("Admissions Dashboard"));
}

#[test]
fn test_cursor_glyph_drawn_at_mapped_cell() {
    let model = update(model(100, 30), Message::Connected);
    let model = update(
        model,
        Message::Cursor {
            x: 0.5,
            y: 0.5,
            now_ms: 0,
        },
    );
    let buffer = draw(&model);
    assert_eq!(buffer.cell((50, 15)).map(|c| c.symbol()), Some(CURSOR_GLYPH));
}

#[test]
fn test_hidden_cursor_is_not_drawn() {
    let model = update(model(100, 30), Message::Connected).with_cursor_visible(false);
    let model = update(
        model,
        Message::Cursor {
            x: 0.5,
            y: 0.5,
            now_ms: 0,
        },
    );
    assert!(!screen_text(&draw(&model)).contains(CURSOR_GLYPH));
}

#[test]
fn test_no_cursor_until_first_pointer_event() {
    let model = update(model(100, 30), Message::Connected);
    assert!(!screen_text(&draw(&model)).contains(CURSOR_GLYPH));
}

#[test]
fn test_scroll_direction_shown_in_status() {
    let mut model = model(100, 30);
    model.scroll_direction = crate::protocol::ScrollDirection::Down;
    let status = row_text(&draw(&model), 29);
    assert!(status.contains("scroll"), "status: {status}");
}

#[test]
fn test_status_arrows_follow_scroll_room() {
    let model = model(100, 12).with_start_page(Page::Admissions.index());
    let status_row = 11;
    assert!(row_text(&draw(&model), status_row).contains("[0% ↓]"));

    let model = update(model, Message::ScrollBy(i64::from(UNITS_PER_ROW) * 3));
    assert!(row_text(&draw(&model), status_row).contains('↕'));

    let model = update(model, Message::ScrollBy(i64::from(UNITS_PER_ROW) * 100));
    let buffer = draw(&model);
    assert!(row_text(&buffer, status_row).contains("[100% ↑]"));
    // Last content row sits on the bottom edge of the content area.
    let content = screen_layout(buffer.area).content;
    assert!(row_text(&buffer, content.bottom() - 1).contains("RV2025_119"));
}

#[test]
fn test_short_page_has_no_scroll_arrows() {
    let model = model(100, 30).with_start_page(Page::Placements.index());
    let status = row_text(&draw(&model), 29);
    assert!(status.contains("[100%]"), "status: {status}");
}
