use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::pages::PAGES;
use crate::protocol::Event as BackendEvent;
use crate::transport::TransportEvent;
use crate::ui::viewport::UNITS_PER_ROW;

/// Rows moved by the mouse wheel.
const WHEEL_ROWS: i64 = 3;

impl App {
    /// Translate a transport event into a message, stamping pointer moves
    /// with the loop clock.
    pub(super) fn transport_message(event: TransportEvent, now_ms: u64) -> Message {
        match event {
            TransportEvent::Connected => Message::Connected,
            TransportEvent::Disconnected(reason) => Message::Disconnected(reason),
            TransportEvent::Event(BackendEvent::Cursor { x, y }) => Message::Cursor { x, y, now_ms },
            TransportEvent::Event(BackendEvent::Scroll { dir }) => Message::Scroll(dir),
            TransportEvent::Event(BackendEvent::Gesture { action }) => Message::Gesture(action),
        }
    }

    pub(super) fn handle_terminal_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let row = i64::from(UNITS_PER_ROW);
        let page_rows = i64::from(model.viewport.height().max(1));
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                (index < PAGES.len()).then_some(Message::SelectPage(index))
            }
            KeyCode::Left | KeyCode::Char('h') => {
                Some(Message::SelectPage(model.current_page.saturating_sub(1)))
            }
            KeyCode::Right | KeyCode::Char('l') => Some(Message::SelectPage(
                (model.current_page + 1).min(PAGES.len() - 1),
            )),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollBy(-row)),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollBy(row)),
            KeyCode::PageUp => Some(Message::ScrollBy(-row * page_rows)),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::ScrollBy(row * page_rows)),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Redraw)
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let row = i64::from(UNITS_PER_ROW);
        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => model
                .element_at(mouse.column, mouse.row)
                .map(Message::Click),
            MouseEventKind::ScrollUp => Some(Message::ScrollBy(-row * WHEEL_ROWS)),
            MouseEventKind::ScrollDown => Some(Message::ScrollBy(row * WHEEL_ROWS)),
            _ => None,
        }
    }
}
