//! Theme system
//!
//! Provides:
//! - Theme struct with all UI colors
//! - Built-in presets (dark, light, paper)
//! - Hex color parsing for config overrides

use ratatui::style::Color;

use crate::dataset::Level;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Card background
    pub surface: Color,
    /// Card border
    pub border: Color,
    /// Brand color (active tab, selected border, basic level)
    pub primary: Color,
    /// Intermediate level, romaji
    pub secondary: Color,
    /// Advanced level, warnings
    pub accent: Color,
    /// Background for the selected card
    pub selection_bg: Color,
    /// Secondary text (hints, status bar)
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme - default
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 18),    // #121212
            foreground: Color::Rgb(255, 255, 255), // #ffffff
            surface: Color::Rgb(30, 30, 30),       // #1e1e1e
            border: Color::Rgb(56, 56, 56),        // #383838
            primary: Color::Rgb(187, 134, 252),    // #bb86fc
            secondary: Color::Rgb(3, 218, 198),    // #03dac6
            accent: Color::Rgb(255, 107, 107),     // #ff6b6b
            selection_bg: Color::Rgb(44, 44, 44),  // #2c2c2c
            dimmed: Color::Rgb(147, 143, 153),     // #938f99
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255), // #ffffff
            foreground: Color::Rgb(17, 24, 28),    // #11181c
            surface: Color::Rgb(245, 245, 245),    // #f5f5f5
            border: Color::Rgb(208, 208, 208),     // #d0d0d0
            primary: Color::Rgb(98, 0, 238),       // #6200ee
            secondary: Color::Rgb(0, 150, 136),    // #009688
            accent: Color::Rgb(255, 107, 107),     // #ff6b6b
            selection_bg: Color::Rgb(230, 224, 240), // #e6e0f0
            dimmed: Color::Rgb(104, 112, 118),     // #687076
        }
    }

    /// Paper theme (blue and orange on white)
    pub fn paper() -> Self {
        Self {
            background: Color::Rgb(255, 251, 254), // #fffbfe
            foreground: Color::Rgb(28, 27, 31),    // #1c1b1f
            surface: Color::Rgb(255, 251, 254),    // #fffbfe
            border: Color::Rgb(121, 116, 126),     // #79747e
            primary: Color::Rgb(25, 118, 210),     // #1976d2
            secondary: Color::Rgb(255, 152, 0),    // #ff9800
            accent: Color::Rgb(179, 38, 30),       // #b3261e
            selection_bg: Color::Rgb(231, 224, 236), // #e7e0ec
            dimmed: Color::Rgb(73, 69, 79),        // #49454f
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" | "default" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "paper" => Some(Self::paper()),
            _ => None,
        }
    }

    /// Replace the primary color
    pub fn with_primary(mut self, primary: Color) -> Self {
        self.primary = primary;
        self
    }

    /// Color used for a kanji difficulty level
    pub fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Basic => self.primary,
            Level::Intermediate => self.secondary,
            Level::Advanced => self.accent,
        }
    }
}

/// Parse a `#rgb` or `#rrggbb` string (leading `#` optional)
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex);
    }

    // Short form repeats each digit: f -> ff = 15 * 17
    let (digits, scale) = match hex.len() {
        3 => (1, 17),
        6 => (2, 1),
        _ => return Err(ColorError::InvalidLength),
    };
    let channel = |i: usize| -> Result<u8, ColorError> {
        u8::from_str_radix(&hex[i * digits..(i + 1) * digits], 16)
            .map(|v| v * scale)
            .map_err(|_| ColorError::InvalidHex)
    };

    Ok(Color::Rgb(channel(0)?, channel(1)?, channel(2)?))
}

/// Format a color the way [`parse_hex_color`] reads it
pub fn format_hex_color(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3 or 6 hex digits)")]
    InvalidLength,
    #[error("invalid hex digit")]
    InvalidHex,
}

/// `serde(with = ...)` helpers for optional hex colors in config files
pub mod serde_color {
    use super::{format_hex_color, parse_hex_color};
    use ratatui::style::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_hex_color(&s).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub fn serialize<S>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Some(color) => serializer.serialize_some(&format_hex_color(*color)),
            None => serializer.serialize_none(),
        }
    }
}
