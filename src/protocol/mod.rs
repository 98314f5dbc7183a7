//! Wire format for messages streamed by the gesture backend.
//!
//! Every text frame carries one JSON object discriminated by a `type`
//! field:
//!
//! ```json
//! {"type": "CURSOR", "x": 0.42, "y": 0.17}
//! {"type": "SCROLL", "dir": "DOWN"}
//! {"type": "GESTURE", "action": "NEXT"}
//! ```
//!
//! Anything that does not match one of these shapes is dropped.

use serde::Deserialize;

/// Direction of the continuous scroll signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    Stop,
}

impl ScrollDirection {
    /// Sign applied to the scroll step: -1 for up, +1 for down, 0 when stopped.
    pub const fn sign(self) -> i64 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
            Self::Stop => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Stop => "STOP",
        }
    }
}

/// Discrete swipe gesture mapped to page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GestureAction {
    Next,
    Back,
}

/// A single event received from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Event {
    /// Pointer position, normalized to `[0, 1]` on both axes.
    Cursor { x: f64, y: f64 },
    Scroll { dir: ScrollDirection },
    Gesture { action: GestureAction },
}

/// Decode one text frame.
///
/// Returns `None` for invalid JSON, unknown `type` values, unknown
/// `dir`/`action` values, or fields of the wrong type.
pub fn parse_message(text: &str) -> Option<Event> {
    match serde_json::from_str::<Event>(text) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::debug!(%err, frame = text, "dropping unrecognized message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cursor_message() {
        let event = parse_message(r#"{"type":"CURSOR","x":0.25,"y":0.75}"#);
        assert_eq!(event, Some(Event::Cursor { x: 0.25, y: 0.75 }));
    }

    #[test]
    fn test_parse_cursor_accepts_integer_coordinates() {
        let event = parse_message(r#"{"type":"CURSOR","x":1,"y":0}"#);
        assert_eq!(event, Some(Event::Cursor { x: 1.0, y: 0.0 }));
    }

    #[test]
    fn test_parse_scroll_directions() {
        assert_eq!(
            parse_message(r#"{"type":"SCROLL","dir":"UP"}"#),
            Some(Event::Scroll {
                dir: ScrollDirection::Up
            })
        );
        assert_eq!(
            parse_message(r#"{"type":"SCROLL","dir":"DOWN"}"#),
            Some(Event::Scroll {
                dir: ScrollDirection::Down
            })
        );
        assert_eq!(
            parse_message(r#"{"type":"SCROLL","dir":"STOP"}"#),
            Some(Event::Scroll {
                dir: ScrollDirection::Stop
            })
        );
    }

    #[test]
    fn test_parse_gesture_actions() {
        assert_eq!(
            parse_message(r#"{"type":"GESTURE","action":"NEXT"}"#),
            Some(Event::Gesture {
                action: GestureAction::Next
            })
        );
        assert_eq!(
            parse_message(r#"{"action":"BACK","type":"GESTURE"}"#),
            Some(Event::Gesture {
                action: GestureAction::Back
            })
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let event = parse_message(r#"{"type":"GESTURE","action":"NEXT","confidence":0.9}"#);
        assert_eq!(
            event,
            Some(Event::Gesture {
                action: GestureAction::Next
            })
        );
    }

    #[test]
    fn test_unknown_payloads_are_dropped() {
        for frame in [
            "",
            "not json",
            "[1,2,3]",
            r#"{"x":0.5,"y":0.5}"#,
            r#"{"type":"ZOOM","level":2}"#,
            r#"{"type":"cursor","x":0.5,"y":0.5}"#,
            r#"{"type":"SCROLL","dir":"LEFT"}"#,
            r#"{"type":"GESTURE","action":"JUMP"}"#,
            r#"{"type":"CURSOR","x":"0.5","y":0.5}"#,
            r#"{"type":"CURSOR","x":0.5}"#,
        ] {
            assert_eq!(parse_message(frame), None, "frame should be dropped: {frame}");
        }
    }

    #[test]
    fn test_scroll_sign() {
        assert_eq!(ScrollDirection::Up.sign(), -1);
        assert_eq!(ScrollDirection::Down.sign(), 1);
        assert_eq!(ScrollDirection::Stop.sign(), 0);
    }
}
