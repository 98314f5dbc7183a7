//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Screen regions and pointer hit testing
//! - [`viewport`]: Scroll position of the page content
//! - [`style`]: Colors for chrome and highlights

pub mod layout;
pub mod style;
pub mod viewport;

mod render;
mod status;

pub use layout::{ElementId, ScreenLayout, element_at, screen_layout};
pub use render::render;

/// Glyph drawn at the simulated cursor.
pub const CURSOR_GLYPH: &str = "●";

#[cfg(test)]
mod tests;
