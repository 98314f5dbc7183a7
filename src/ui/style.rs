//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::app::{ConnectionStatus, ToastLevel};

/// Brand text in the navigation bar.
pub fn brand() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Navigation tab label.
pub fn tab(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Border of a tab or panel, reflecting hover and selection.
pub fn border(hovered: bool, selected: bool) -> Style {
    match (hovered, selected) {
        (true, _) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Green),
        (false, false) => Style::default().fg(Color::DarkGray),
    }
}

pub fn heading() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Single-line data row.
pub fn row(hovered: bool, selected: bool) -> Style {
    let base = Style::default();
    let base = if selected { base.reversed() } else { base };
    if hovered {
        base.bg(Color::DarkGray).fg(Color::Yellow)
    } else {
        base
    }
}

pub fn panel_text(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn cursor() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Backend indicator in the status bar.
pub fn connection(status: ConnectionStatus) -> Style {
    match status {
        ConnectionStatus::Connected => Style::default().bg(Color::Green).fg(Color::Black),
        ConnectionStatus::Disconnected => Style::default().bg(Color::Red).fg(Color::White),
    }
}

pub fn status_bar() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn toast(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", status_bar()),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}
