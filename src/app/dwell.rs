//! Hover-and-hold click detection.
//!
//! Time is passed in as milliseconds since the event loop started, so the
//! state machine never reads a clock and can be driven directly in tests.

use crate::ui::ElementId;

/// Default hold time before a synthesized click.
pub const DEFAULT_DWELL_MS: u64 = 850;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellState {
    /// Nothing interactive under the cursor.
    Idle,
    /// Cursor resting on `target`; click once `deadline_ms` passes.
    Hovering { target: ElementId, deadline_ms: u64 },
    /// Click already delivered (or skipped) for `target`.
    Fired { target: ElementId },
}

#[derive(Debug, Clone)]
pub struct DwellClick {
    dwell_ms: u64,
    state: DwellState,
}

impl DwellClick {
    pub const fn new(dwell_ms: u64) -> Self {
        Self {
            dwell_ms,
            state: DwellState::Idle,
        }
    }

    pub const fn state(&self) -> DwellState {
        self.state
    }

    pub const fn dwell_ms(&self) -> u64 {
        self.dwell_ms
    }

    /// The recorded hover target, whether or not it already fired.
    pub const fn target(&self) -> Option<ElementId> {
        match self.state {
            DwellState::Idle => None,
            DwellState::Hovering { target, .. } | DwellState::Fired { target } => Some(target),
        }
    }

    pub const fn deadline_ms(&self) -> Option<u64> {
        match self.state {
            DwellState::Hovering { deadline_ms, .. } => Some(deadline_ms),
            _ => None,
        }
    }

    pub const fn is_due(&self, now_ms: u64) -> bool {
        match self.state {
            DwellState::Hovering { deadline_ms, .. } => now_ms >= deadline_ms,
            _ => false,
        }
    }

    /// Record the element under the cursor after a pointer move.
    ///
    /// A different element cancels any pending hold and arms a fresh one;
    /// the same element leaves the timer untouched. Returns true when the
    /// target changed.
    pub fn observe(&mut self, target: Option<ElementId>, now_ms: u64) -> bool {
        if target == self.target() {
            return false;
        }
        self.state = match target {
            Some(target) => DwellState::Hovering {
                target,
                deadline_ms: now_ms.saturating_add(self.dwell_ms),
            },
            None => DwellState::Idle,
        };
        true
    }

    /// Check the deadline against the element currently at the cursor.
    ///
    /// Returns the element to click at most once per hover. When the
    /// deadline passes but something else now sits under the cursor (the
    /// page changed or scrolled), the hold is spent without a click.
    pub fn poll(&mut self, now_ms: u64, under_cursor: Option<ElementId>) -> Option<ElementId> {
        let DwellState::Hovering {
            target,
            deadline_ms,
        } = self.state
        else {
            return None;
        };
        if now_ms < deadline_ms {
            return None;
        }
        self.state = DwellState::Fired { target };
        (under_cursor == Some(target)).then_some(target)
    }

    /// Drop any pending hold and forget the target.
    pub const fn cancel(&mut self) {
        self.state = DwellState::Idle;
    }
}

impl Default for DwellClick {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL_MS)
    }
}
