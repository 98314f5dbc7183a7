use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::Model;
use crate::pages::{BRAND, PAGES, Section};

use super::layout::{
    CONTENT_MARGIN, ElementId, ScreenLayout, content_inner_width, screen_layout, section_slots,
};
use super::{CURSOR_GLYPH, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let screen = screen_layout(frame.area());

    render_nav(model, frame, &screen);
    render_page(model, frame, screen.content);
    status::render_status_bar(model, frame, screen.status);

    if model.cursor_visible {
        render_cursor(model, frame);
    }
}

fn render_nav(model: &Model, frame: &mut Frame, screen: &ScreenLayout) {
    let brand = screen.brand;
    if brand.height > 0 {
        let row = Rect::new(brand.x, brand.y + brand.height / 2, brand.width, 1);
        frame.render_widget(
            Paragraph::new(Line::styled(format!("  {BRAND}"), style::brand())),
            row,
        );
    }

    for (index, (page, rect)) in PAGES.iter().zip(&screen.tabs).enumerate() {
        if rect.is_empty() {
            continue;
        }
        let active = index == model.current_page;
        let hovered = model.hover == Some(ElementId::NavTab(index));
        let tab = Paragraph::new(Line::styled(page.title(), style::tab(active)))
            .centered()
            .block(Block::bordered().border_style(style::border(hovered, active)));
        frame.render_widget(tab, *rect);
    }
}

/// Draw the whole page onto an offscreen canvas, then copy the rows the
/// viewport currently shows. Sections cut by the top edge keep their
/// borders intact this way.
fn render_page(model: &Model, frame: &mut Frame, area: Rect) {
    let inner_width = content_inner_width(area);
    if inner_width == 0 || area.height == 0 {
        return;
    }

    let page = model.page();
    let sections = page.sections();
    let total_rows = u16::try_from(page.content_rows()).unwrap_or(u16::MAX);
    let mut canvas = Buffer::empty(Rect::new(0, 0, inner_width, total_rows));

    for slot in section_slots(&sections) {
        let Ok(top) = u16::try_from(slot.top) else {
            break;
        };
        let rect = Rect::new(0, top, inner_width, slot.height).intersection(canvas.area);
        if rect.is_empty() {
            continue;
        }
        let element = ElementId::Section {
            page: model.current_page,
            index: slot.index,
        };
        draw_section(
            &sections[slot.index],
            rect,
            model.hover == Some(element),
            model.selected_section == Some(slot.index),
            &mut canvas,
        );
    }

    let dest = Rect::new(area.x + CONTENT_MARGIN, area.y, inner_width, area.height);
    blit_rows(&canvas, model.viewport.visible_rows(), dest, frame.buffer_mut());
}

fn draw_section(section: &Section, rect: Rect, hovered: bool, selected: bool, buf: &mut Buffer) {
    match section {
        Section::Heading(text) => {
            let line = Rect::new(rect.x, rect.y, rect.width, 1);
            Paragraph::new(text.as_str())
                .style(style::heading().patch(style::row(hovered, selected)))
                .render(line, buf);
        }
        Section::Panel { title, lines } => {
            let mut block = Block::bordered().border_style(style::border(hovered, selected));
            if let Some(title) = title {
                block = block.title(format!(" {title} "));
            }
            let text: Vec<Line> = lines.iter().map(|l| Line::raw(l.as_str())).collect();
            Paragraph::new(text)
                .style(style::panel_text(selected))
                .block(block)
                .render(rect, buf);
        }
        Section::Row(text) => {
            Paragraph::new(text.as_str())
                .style(style::row(hovered, selected))
                .render(rect, buf);
        }
        Section::Spacer(_) => {}
    }
}

fn blit_rows(canvas: &Buffer, rows: Range<usize>, dest: Rect, buf: &mut Buffer) {
    for (y, src_row) in (0..dest.height).zip(rows) {
        let Ok(src_y) = u16::try_from(src_row) else {
            break;
        };
        if src_y >= canvas.area.height {
            break;
        }
        for x in 0..dest.width.min(canvas.area.width) {
            if let (Some(src), Some(dst)) =
                (canvas.cell((x, src_y)), buf.cell_mut((dest.x + x, dest.y + y)))
            {
                *dst = src.clone();
            }
        }
    }
}

fn render_cursor(model: &Model, frame: &mut Frame) {
    let Some(position) = model.cursor_cell() else {
        return;
    };
    if let Some(cell) = frame.buffer_mut().cell_mut(position) {
        cell.set_symbol(CURSOR_GLYPH).set_style(style::cursor());
    }
}
