//! Styling utilities and color schemes
//!
//! Only one theme key is recognised (`hpe`); anything else falls back to
//! the base palette.

use ratatui::style::Color;
use std::str::FromStr;

/// Palette used by every view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub border: Color,
    pub focused_border: Color,
    pub highlight_bg: Color,
    pub muted: Color,
}

impl Theme {
    /// Palette for a theme key; `None` for unknown keys
    pub fn named(key: Option<&str>) -> Option<Self> {
        match key {
            Some("hpe") => Some(Self {
                accent: Color::Rgb(0x01, 0xA9, 0x82),
                border: Color::Rgb(0x42, 0x5C, 0x54),
                focused_border: Color::Rgb(0x01, 0xA9, 0x82),
                highlight_bg: Color::Rgb(0x1B, 0x3A, 0x32),
                muted: Color::Rgb(0x99, 0x99, 0x99),
            }),
            _ => None,
        }
    }

    /// Palette for a theme key, default styling for unknown keys
    pub fn resolve(key: Option<&str>) -> Self {
        Self::named(key).unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            border: Color::DarkGray,
            focused_border: Color::Cyan,
            highlight_bg: Color::DarkGray,
            muted: Color::Gray,
        }
    }
}

/// Get the color for an HTTP method
pub fn get_method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "DELETE" => Color::Red,
        "PATCH" => Color::Cyan,
        _ => Color::White,
    }
}

/// Color for an HTTP status code
pub fn get_status_color(status: u16) -> Color {
    match status {
        200..=299 => Color::Green,
        300..=399 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Parse a background color name (`navy`, `light-blue`) or `#rrggbb`
pub fn parse_background(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}

/// Method column width for consistent formatting
pub const METHOD_COLUMN_WIDTH: usize = 7;
