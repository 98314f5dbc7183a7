use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::pages::{PAGES, Page};
use crate::protocol::{GestureAction, ScrollDirection};
use crate::ui::viewport::Viewport;
use crate::ui::{ElementId, element_at, screen_layout};

use super::Tuning;
use super::dwell::DwellClick;

/// Backend link state as shown in the status bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Simulated cursor position in screen units (columns, rows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPos {
    pub x: f64,
    pub y: f64,
}

impl CursorPos {
    /// Map normalized backend coordinates onto a `width` x `height` screen.
    ///
    /// Coordinates outside `[0, 1]` are clamped first.
    pub fn from_normalized(x: f64, y: f64, width: u16, height: u16) -> Self {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        let y = if y.is_nan() { 0.0 } else { y.clamp(0.0, 1.0) };
        Self {
            x: x * f64::from(width),
            y: y * f64::from(height),
        }
    }

    /// Cell containing this position, kept inside the screen.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell(self, width: u16, height: u16) -> (u16, u16) {
        // Both values are clamped to [0, width] / [0, height] above.
        let col = (self.x.floor() as u16).min(width.saturating_sub(1));
        let row = (self.y.floor() as u16).min(height.saturating_sub(1));
        (col, row)
    }
}

/// The complete UI state.
///
/// All state lives here; the event loop only owns timers and I/O.
pub struct Model {
    /// Index of the active page in [`PAGES`]
    pub current_page: usize,
    /// Last cursor position reported by the backend
    pub cursor: Option<CursorPos>,
    /// Whether the cursor glyph is drawn
    pub cursor_visible: bool,
    /// Direction the smooth-scroll loop is moving in
    pub scroll_direction: ScrollDirection,
    pub connection: ConnectionStatus,
    /// Scroll state of the content area
    pub viewport: Viewport,
    /// Element under the cursor as of the last pointer move
    pub hover: Option<ElementId>,
    /// Highlighted section on the current page
    pub selected_section: Option<usize>,
    /// Hover-and-hold click detector
    pub dwell: DwellClick,
    /// Scroll units moved per scroll tick
    pub scroll_step: u32,
    /// Whether the app should quit
    pub should_quit: bool,
    terminal_size: (u16, u16),
    synthesized_clicks: u64,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("page", &self.page().title())
            .field("connection", &self.connection)
            .field("scroll_direction", &self.scroll_direction)
            .field("hover", &self.hover)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for a terminal of `terminal_size` (columns, rows).
    pub fn new(terminal_size: (u16, u16), tuning: &Tuning) -> Self {
        let content = screen_layout(Rect::new(0, 0, terminal_size.0, terminal_size.1)).content;
        Self {
            current_page: 0,
            cursor: None,
            cursor_visible: true,
            scroll_direction: ScrollDirection::Stop,
            connection: ConnectionStatus::Disconnected,
            viewport: Viewport::new(content.width, content.height, PAGES[0].content_rows()),
            hover: None,
            selected_section: None,
            dwell: DwellClick::new(tuning.dwell_ms),
            scroll_step: tuning.scroll_step,
            should_quit: false,
            terminal_size,
            synthesized_clicks: 0,
            toast: None,
        }
    }

    /// Start on the page at `index` (clamped to the page list).
    #[must_use]
    pub fn with_start_page(mut self, index: usize) -> Self {
        self.set_page(index);
        self
    }

    #[must_use]
    pub const fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn page(&self) -> Page {
        PAGES.get(self.current_page).copied().unwrap_or(Page::Home)
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub const fn terminal_area(&self) -> Rect {
        Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1)
    }

    pub const fn is_connected(&self) -> bool {
        matches!(self.connection, ConnectionStatus::Connected)
    }

    /// Number of clicks produced by holding the cursor still.
    pub const fn synthesized_clicks(&self) -> u64 {
        self.synthesized_clicks
    }

    pub fn element_at(&self, col: u16, row: u16) -> Option<ElementId> {
        element_at(
            self.terminal_area(),
            self.current_page,
            &self.viewport,
            col,
            row,
        )
    }

    pub fn cursor_cell(&self) -> Option<(u16, u16)> {
        let (width, height) = self.terminal_size;
        if width == 0 || height == 0 {
            return None;
        }
        self.cursor.map(|pos| pos.cell(width, height))
    }

    /// Element currently at the last known cursor position.
    pub fn element_under_cursor(&self) -> Option<ElementId> {
        let (col, row) = self.cursor_cell()?;
        self.element_at(col, row)
    }

    /// Switch pages, resetting scroll and selection. Out-of-range indices
    /// are clamped to the last page.
    pub fn set_page(&mut self, index: usize) {
        let index = index.min(PAGES.len() - 1);
        if index == self.current_page {
            return;
        }
        tracing::debug!(
            from = self.page().title(),
            to = PAGES[index].title(),
            "page changed"
        );
        self.current_page = index;
        self.selected_section = None;
        self.viewport.go_to_top();
        self.viewport.set_content_rows(PAGES[index].content_rows());
    }

    /// Move one page forward or back; no-op at either end.
    pub fn step_page(&mut self, action: GestureAction) {
        match action {
            GestureAction::Next if self.current_page + 1 < PAGES.len() => {
                self.set_page(self.current_page + 1);
            }
            GestureAction::Back if self.current_page > 0 => {
                self.set_page(self.current_page - 1);
            }
            _ => {}
        }
    }

    /// Apply a pointer move from the backend.
    pub(super) fn move_cursor(&mut self, x: f64, y: f64, now_ms: u64) {
        let (width, height) = self.terminal_size;
        self.cursor = Some(CursorPos::from_normalized(x, y, width, height));
        let target = self.element_under_cursor();
        self.hover = target;
        if self.dwell.observe(target, now_ms) {
            tracing::trace!(?target, now_ms, "hover target changed");
        }
    }

    /// Deliver a click to `element`.
    pub(super) fn click(&mut self, element: ElementId) {
        match element {
            ElementId::NavTab(index) => self.set_page(index),
            ElementId::Section { page, index } if page == self.current_page => {
                self.selected_section = if self.selected_section == Some(index) {
                    None
                } else {
                    Some(index)
                };
            }
            ElementId::Section { .. } => {}
        }
    }

    pub(super) fn record_synthesized_click(&mut self, element: ElementId) {
        self.synthesized_clicks += 1;
        tracing::debug!(?element, total = self.synthesized_clicks, "dwell click");
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        let content = screen_layout(self.terminal_area()).content;
        self.viewport.resize(content.width, content.height);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24), &Tuning::default())
    }
}
