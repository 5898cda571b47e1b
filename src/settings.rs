//! Display settings adjustable from the settings panel
//!
//! Holds the color modes and colors used to draw the artwork view, plus
//! whether the details panel is visible.

use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error types for settings values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The value is not a `#rrggbb` hex color
    #[error("Invalid color: '{0}'. Expected a hex color like #ff8800")]
    InvalidColor(String),

    /// The value is not a known color mode
    #[error("Invalid color mode: '{0}'. Valid modes: sampled, fixed")]
    InvalidColorMode(String),
}

/// Where a color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Taken from the artwork image
    #[default]
    Sampled,
    /// A single user-chosen color
    Fixed,
}

impl ColorMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Sampled => ColorMode::Fixed,
            ColorMode::Fixed => ColorMode::Sampled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Sampled => "sampled",
            ColorMode::Fixed => "fixed",
        }
    }
}

impl FromStr for ColorMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sampled" | "sample" => Ok(ColorMode::Sampled),
            "fixed" => Ok(ColorMode::Fixed),
            _ => Err(SettingsError::InvalidColorMode(s.to_string())),
        }
    }
}

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`, case-insensitive
    pub fn from_hex(s: &str) -> Result<Self, SettingsError> {
        let invalid = || SettingsError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Which of the settings colors a command or prompt applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Char,
    Cell,
    Background,
}

impl ColorTarget {
    pub fn label(self) -> &'static str {
        match self {
            ColorTarget::Char => "Character color",
            ColorTarget::Cell => "Cell color",
            ColorTarget::Background => "Background color",
        }
    }
}

/// Current display parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Source of the character (foreground) color
    pub char_color_mode: ColorMode,
    /// Character color used in fixed mode
    pub char_color: Rgb,
    /// Source of the cell (background) color
    pub cell_color_mode: ColorMode,
    /// Cell color used in fixed mode
    pub cell_color: Rgb,
    /// Color behind the artwork frame
    pub background_color: Rgb,
    /// Whether the artwork details panel is shown
    pub show_details: bool,
}

impl Settings {
    /// The color currently chosen for `target`
    pub fn color(&self, target: ColorTarget) -> Rgb {
        match target {
            ColorTarget::Char => self.char_color,
            ColorTarget::Cell => self.cell_color,
            ColorTarget::Background => self.background_color,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            char_color_mode: ColorMode::Sampled,
            char_color: Rgb::WHITE,
            cell_color_mode: ColorMode::Fixed,
            cell_color: Rgb::BLACK,
            background_color: Rgb::BLACK,
            show_details: false,
        }
    }
}
