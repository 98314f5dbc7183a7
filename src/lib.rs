// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. pages::Page)
    clippy::module_name_repetitions
)]

//! # Gesture Kiosk
//!
//! A touchless information kiosk for the terminal.
//!
//! A hand-tracking backend streams cursor, scroll and swipe events over a
//! WebSocket. The kiosk turns them into:
//! - A simulated cursor mapped onto the terminal grid
//! - Clicks synthesized after holding the cursor over an element
//! - Page navigation from swipe gestures
//! - Smooth scrolling while a scroll gesture is held
//!
//! ## Architecture
//!
//! The kiosk uses The Elm Architecture (TEA) pattern:
//! - **Model**: UI state
//! - **Message**: Backend events, timer ticks and manual input
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main loop, state and the event translator
//! - [`protocol`]: Backend message format
//! - [`transport`]: WebSocket link to the backend
//! - [`pages`]: Static page content
//! - [`ui`]: Layout, hit testing and rendering
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod pages;
pub mod protocol;
pub mod transport;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, Tuning, update};
    pub use crate::pages::{PAGES, Page};
    pub use crate::protocol::{Event, GestureAction, ScrollDirection};
    pub use crate::ui::ElementId;
}
