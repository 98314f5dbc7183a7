use crate::app::Model;
use crate::app::model::{ConnectionStatus, ToastLevel};
use crate::protocol::{GestureAction, ScrollDirection};
use crate::ui::ElementId;

/// All possible events and actions in the application.
///
/// Backend events arrive through the transport; the rest come from the
/// terminal or from the event loop's timers.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Backend
    /// Pointer moved to normalized (x, y) at `now_ms`
    Cursor { x: f64, y: f64, now_ms: u64 },
    /// Scroll direction changed
    Scroll(ScrollDirection),
    /// Swipe gesture
    Gesture(GestureAction),
    /// Backend link established
    Connected,
    /// Backend link lost, with the reason when known
    Disconnected(Option<String>),

    // Timers
    /// Check the dwell deadline
    DwellTick(u64),
    /// Apply this many scroll ticks
    ScrollTick(u32),

    // Manual input
    /// Select a page directly
    SelectPage(usize),
    /// Click an element
    Click(ElementId),
    /// Scroll by a signed number of scroll units
    ScrollBy(i64),

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Backend messages are ignored unless the link is up, so a dropped
/// connection freezes the display.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Cursor { x, y, now_ms } => {
            if model.is_connected() {
                // A hold that completed before this move still clicks.
                fire_due_dwell(&mut model, now_ms);
                model.move_cursor(x, y, now_ms);
            }
        }
        Message::Scroll(dir) => {
            if model.is_connected() {
                model.scroll_direction = dir;
            }
        }
        Message::Gesture(action) => {
            if model.is_connected() {
                model.step_page(action);
            }
        }
        Message::Connected => {
            model.connection = ConnectionStatus::Connected;
            model.show_toast(ToastLevel::Info, "Gesture backend connected");
        }
        Message::Disconnected(reason) => {
            let was_connected = model.is_connected();
            model.connection = ConnectionStatus::Disconnected;
            model.scroll_direction = ScrollDirection::Stop;
            model.dwell.cancel();
            model.hover = None;
            match reason {
                Some(reason) => model.show_toast(ToastLevel::Error, format!("Backend: {reason}")),
                None if was_connected => {
                    model.show_toast(ToastLevel::Warning, "Gesture backend closed the connection");
                }
                None => {}
            }
        }

        Message::DwellTick(now_ms) => fire_due_dwell(&mut model, now_ms),
        Message::ScrollTick(ticks) => {
            let delta = model.scroll_direction.sign()
                * i64::from(model.scroll_step)
                * i64::from(ticks);
            model.viewport.scroll_by(delta);
        }

        Message::SelectPage(index) => model.set_page(index),
        Message::Click(element) => model.click(element),
        Message::ScrollBy(delta) => model.viewport.scroll_by(delta),

        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }
    model
}

fn fire_due_dwell(model: &mut Model, now_ms: u64) {
    let under_cursor = model.element_under_cursor();
    if let Some(element) = model.dwell.poll(now_ms, under_cursor) {
        model.record_synthesized_click(element);
        model.click(element);
    }
}
