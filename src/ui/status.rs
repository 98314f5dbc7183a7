use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::pages::PAGES;

use super::style;

/// Backend indicator on the left, then either a toast or page details.
pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let backend = Span::styled(
        format!(" Backend: {} ", model.connection.label()),
        style::connection(model.connection),
    );

    let detail = if let Some((message, level)) = model.active_toast() {
        let (prefix, toast_style) = style::toast(level);
        Span::styled(format!(" {prefix} {message}"), toast_style)
    } else {
        let scroll_indicator = match model.scroll_direction.sign() {
            0 => String::new(),
            _ => format!("  scroll {}", model.scroll_direction.label()),
        };
        Span::raw(format!(
            "  {} ({}/{})  [{}%{}]{}  1-{}:page  q:quit",
            model.page().title(),
            model.current_page + 1,
            PAGES.len(),
            model.viewport.scroll_percent(),
            scroll_arrows(model),
            scroll_indicator,
            PAGES.len(),
        ))
    };

    let bar = Paragraph::new(Line::from(vec![backend, detail])).style(style::status_bar());
    frame.render_widget(bar, area);
}

/// Which ways the page can still move.
fn scroll_arrows(model: &Model) -> &'static str {
    match (
        model.viewport.can_scroll_up(),
        model.viewport.can_scroll_down(),
    ) {
        (true, true) => " ↕",
        (true, false) => " ↑",
        (false, true) => " ↓",
        (false, false) => "",
    }
}
