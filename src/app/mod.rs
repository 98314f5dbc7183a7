//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete UI state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering and timers

mod dwell;
mod event_loop;
mod input;
mod model;
mod update;

pub use dwell::{DEFAULT_DWELL_MS, DwellClick, DwellState};
pub use event_loop::ScrollTicker;
pub use model::{ConnectionStatus, CursorPos, Model, ToastLevel};
pub use update::{Message, update};

/// Default backend address.
pub const DEFAULT_BACKEND_URL: &str = "ws://localhost:8080";
/// Default scroll units per tick.
pub const DEFAULT_SCROLL_STEP: u32 = 12;
/// Default interval between scroll ticks.
pub const DEFAULT_SCROLL_INTERVAL_MS: u64 = 20;

/// Timing knobs for the interaction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Hold time before a synthesized click
    pub dwell_ms: u64,
    /// Scroll units moved per tick
    pub scroll_step: u32,
    /// Interval between scroll ticks
    pub scroll_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dwell_ms: DEFAULT_DWELL_MS,
            scroll_step: DEFAULT_SCROLL_STEP,
            scroll_interval_ms: DEFAULT_SCROLL_INTERVAL_MS,
        }
    }
}

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    backend_url: String,
    tuning: Tuning,
    start_page: usize,
    cursor_visible: bool,
}

impl App {
    /// Create an application that listens to the backend at `backend_url`.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            tuning: Tuning::default(),
            start_page: 0,
            cursor_visible: true,
        }
    }

    /// Override dwell and scroll timing.
    #[must_use]
    pub const fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Page index shown at startup.
    #[must_use]
    pub const fn with_start_page(mut self, index: usize) -> Self {
        self.start_page = index;
        self
    }

    /// Show or hide the simulated cursor glyph.
    #[must_use]
    pub const fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
}
