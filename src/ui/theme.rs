//! Color theme for the demo chrome and table style presets

use ratatui::style::{Color, Modifier, Style};
use serde_json::json;

use crate::models::{style_keys, StyleConfig};

/// Colors for everything around the table: filter bar, borders, status bar
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            warning: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }
}

/// Table style the demo starts with
pub fn base_table_style() -> StyleConfig {
    StyleConfig::empty()
        .with(style_keys::FONT, json!(["Arial", 11]))
        .with(style_keys::HEADER_BACKGROUND, "#34495e")
        .with(style_keys::HEADER_FOREGROUND, "white")
        .with(style_keys::ROW_BACKGROUND_EVEN, "#ecf0f1")
        .with(style_keys::ROW_BACKGROUND_ODD, "#ffffff")
        .with(style_keys::ROW_HOVER_BACKGROUND, "#dcdfe1")
        .with(style_keys::BORDER_COLOR, "#bdc3c7")
        .with(style_keys::CELL_PADDING, 7)
        .with(style_keys::BORDER_WIDTH, 2)
        .with(style_keys::ROW_HEIGHT, 45)
        .with(style_keys::HEADER_HEIGHT, 50)
        .with(style_keys::CORNER_RADIUS, 6)
}

/// Partial override swapped in at runtime
pub fn accent_table_style() -> StyleConfig {
    StyleConfig::empty()
        .with(style_keys::HEADER_BACKGROUND, "#2c3e50")
        .with(style_keys::ROW_HOVER_BACKGROUND, "#f39c12")
        .with(style_keys::BORDER_COLOR, "#e74c3c")
}
