//! Screen geometry shared by rendering and hit testing.
//!
//! Both the renderer and the pointer lookup go through these functions, so
//! whatever is drawn at a cell is exactly what a click at that cell hits.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

use crate::pages::{BRAND, PAGES, Page, Section};

use super::viewport::Viewport;

pub const NAV_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;
/// Blank columns on each side of page content.
pub const CONTENT_MARGIN: u16 = 1;
const TAB_PADDING: u16 = 4;

/// Identity of an element the cursor can hover and click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Navigation tab for the page at this index.
    NavTab(usize),
    /// A content section on a page.
    Section { page: usize, index: usize },
}

/// Fixed regions of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub nav: Rect,
    pub brand: Rect,
    /// One rect per page; zero-sized when the tab does not fit.
    pub tabs: Vec<Rect>,
    pub content: Rect,
    pub status: Rect,
}

/// Vertical placement of a section inside the page, in content rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot {
    pub index: usize,
    pub top: usize,
    pub height: u16,
}

impl SectionSlot {
    pub const fn contains_row(&self, row: usize) -> bool {
        row >= self.top && row < self.top + self.height as usize
    }
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAV_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let nav = rows[0];

    let brand_width = (u16::try_from(BRAND.width()).unwrap_or(u16::MAX) + TAB_PADDING)
        .min(nav.width);
    let brand = Rect::new(nav.x, nav.y, brand_width, nav.height);

    let mut x = brand.right();
    let tabs = PAGES
        .iter()
        .map(|page| {
            let width = u16::try_from(page.title().width()).unwrap_or(u16::MAX) + TAB_PADDING;
            if x.saturating_add(width) > nav.right() {
                return Rect::new(nav.right(), nav.y, 0, 0);
            }
            let rect = Rect::new(x, nav.y, width, nav.height);
            x += width;
            rect
        })
        .collect();

    ScreenLayout {
        nav,
        brand,
        tabs,
        content: rows[1],
        status: rows[2],
    }
}

/// Width available to page content inside `content`.
pub const fn content_inner_width(content: Rect) -> u16 {
    content.width.saturating_sub(CONTENT_MARGIN * 2)
}

/// Stack sections top to bottom.
pub fn section_slots(sections: &[Section]) -> Vec<SectionSlot> {
    let mut top = 0usize;
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let slot = SectionSlot {
                index,
                top,
                height: section.height(),
            };
            top += usize::from(slot.height);
            slot
        })
        .collect()
}

pub const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Topmost interactive element at a screen cell.
pub fn element_at(
    area: Rect,
    page_index: usize,
    viewport: &Viewport,
    col: u16,
    row: u16,
) -> Option<ElementId> {
    let screen = screen_layout(area);

    if let Some(tab) = screen
        .tabs
        .iter()
        .position(|rect| point_in_rect(col, row, *rect))
    {
        return Some(ElementId::NavTab(tab));
    }

    let content = screen.content;
    let inner_left = content.x + CONTENT_MARGIN;
    let inner_right = inner_left + content_inner_width(content);
    if !point_in_rect(col, row, content) || col < inner_left || col >= inner_right {
        return None;
    }

    let page = PAGES.get(page_index).copied().unwrap_or(Page::Home);
    let sections = page.sections();
    let content_row = usize::from(row - content.y) + viewport.first_row();
    section_slots(&sections)
        .into_iter()
        .find(|slot| slot.contains_row(content_row))
        .filter(|slot| sections[slot.index].is_interactive())
        .map(|slot| ElementId::Section {
            page: page_index,
            index: slot.index,
        })
}
