//! Viewport management for scrolling page content.
//!
//! The [`Viewport`] tracks the visible content area and a scroll offset
//! measured in fine-grained scroll units rather than whole rows, so the
//! smooth-scroll loop can move a fraction of a row per tick.

use std::ops::Range;

/// Scroll units per terminal row.
pub const UNITS_PER_ROW: u32 = 16;

/// Manages the visible portion of a page.
///
/// # Example
///
/// ```
/// use gesture_kiosk::ui::viewport::{UNITS_PER_ROW, Viewport};
///
/// let mut vp = Viewport::new(80, 10, 30);
/// assert_eq!(vp.visible_rows(), 0..10);
///
/// vp.scroll_down(3 * UNITS_PER_ROW);
/// assert_eq!(vp.visible_rows(), 3..13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: u32,
    content_rows: usize,
}

impl Viewport {
    /// Create a viewport at the top of the content.
    ///
    /// # Arguments
    ///
    /// * `width` - Content area width in columns
    /// * `height` - Content area height in rows
    /// * `content_rows` - Total rows of page content
    pub const fn new(width: u16, height: u16, content_rows: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            content_rows,
        }
    }

    /// Current scroll offset in scroll units.
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn content_rows(&self) -> usize {
        self.content_rows
    }

    /// First content row shown at the top of the viewport.
    pub const fn first_row(&self) -> usize {
        (self.offset / UNITS_PER_ROW) as usize
    }

    /// Range of content rows currently on screen.
    pub fn visible_rows(&self) -> Range<usize> {
        let start = self.first_row();
        let end = (start + self.height as usize).min(self.content_rows);
        start..end.max(start)
    }

    /// Scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        let percent = u64::from(self.offset) * 100 / u64::from(max_offset);
        u8::try_from(percent.min(100)).unwrap_or(100)
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll up by `units`.
    pub const fn scroll_up(&mut self, units: u32) {
        self.offset = self.offset.saturating_sub(units);
    }

    /// Scroll down by `units`, stopping at the end of the content.
    pub fn scroll_down(&mut self, units: u32) {
        self.offset = self.offset.saturating_add(units).min(self.max_offset());
    }

    /// Scroll by a signed amount; negative moves up.
    pub fn scroll_by(&mut self, delta: i64) {
        let magnitude = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        if delta < 0 {
            self.scroll_up(magnitude);
        } else {
            self.scroll_down(magnitude);
        }
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    /// Resize the content area, keeping the offset valid.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Swap in new content (e.g. after a page change).
    pub fn set_content_rows(&mut self, rows: usize) {
        self.content_rows = rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Largest valid offset: the last content row sits at the bottom edge.
    pub const fn max_offset(&self) -> u32 {
        let hidden = self.content_rows.saturating_sub(self.height as usize);
        let hidden = if hidden > (u32::MAX / UNITS_PER_ROW) as usize {
            u32::MAX / UNITS_PER_ROW
        } else {
            hidden as u32
        };
        hidden * UNITS_PER_ROW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 20, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_rows(), 0..20);
    }

    #[test]
    fn test_visible_rows_with_short_content() {
        let vp = Viewport::new(80, 20, 6);
        assert_eq!(vp.visible_rows(), 0..6);
        assert_eq!(vp.max_offset(), 0);
    }

    #[test]
    fn test_partial_row_scroll_keeps_first_row() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(12);
        assert_eq!(vp.offset(), 12);
        assert_eq!(vp.first_row(), 0);
        vp.scroll_down(12);
        assert_eq!(vp.first_row(), 1);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(1_000_000);
        assert_eq!(vp.offset(), 80 * UNITS_PER_ROW);
        assert_eq!(vp.visible_rows(), 80..100);
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(40);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
        assert!(!vp.can_scroll_up());
    }

    #[test]
    fn test_scroll_by_signed() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_by(36);
        assert_eq!(vp.offset(), 36);
        vp.scroll_by(-12);
        assert_eq!(vp.offset(), 24);
        vp.scroll_by(-1000);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(80, 20, 30);
        assert_eq!(vp.scroll_percent(), 0);
        vp.scroll_down(5 * UNITS_PER_ROW);
        assert_eq!(vp.scroll_percent(), 50);
        vp.scroll_down(u32::MAX);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_percent_short_content() {
        let vp = Viewport::new(80, 20, 4);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(u32::MAX);
        vp.resize(80, 60);
        assert_eq!(vp.offset(), 40 * UNITS_PER_ROW);
    }

    #[test]
    fn test_set_content_rows_adjusts_offset() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(u32::MAX);
        vp.set_content_rows(30);
        assert_eq!(vp.offset(), 10 * UNITS_PER_ROW);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                content_rows in 0..5000usize,
                height in 1..100u16,
                deltas in proptest::collection::vec(-5000i64..5000, 0..50),
            ) {
                let mut vp = Viewport::new(80, height, content_rows);
                for delta in deltas {
                    vp.scroll_by(delta);
                    prop_assert!(vp.offset() <= vp.max_offset());
                }
            }

            #[test]
            fn visible_rows_within_bounds(
                content_rows in 0..5000usize,
                height in 1..100u16,
                units in 0..200_000u32,
            ) {
                let mut vp = Viewport::new(80, height, content_rows);
                vp.scroll_down(units);

                let range = vp.visible_rows();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= content_rows.max(range.start));
                prop_assert!(range.len() <= height as usize);
            }

            #[test]
            fn percent_always_valid(
                content_rows in 0..5000usize,
                height in 1..100u16,
                units in 0..200_000u32,
            ) {
                let mut vp = Viewport::new(80, height, content_rows);
                vp.scroll_down(units);
                prop_assert!(vp.scroll_percent() <= 100);
            }
        }
    }
}
