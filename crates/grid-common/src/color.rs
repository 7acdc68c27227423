//! RGBA colors and the loose color syntax accepted in option files.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0, 255);
    pub const CYAN: Color = Color::new(0, 255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray of the given level.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Color::from_array(rgba)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Color representation supporting multiple formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },

    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Hex string "#RRGGBB" / "#RRGGBBAA", or a color name
    Text(String),
}

impl TryFrom<ColorSpec> for Color {
    type Error = GridError;

    fn try_from(spec: ColorSpec) -> Result<Self, GridError> {
        let invalid = |message: String| GridError::InvalidOption {
            option: "color".to_string(),
            message,
        };
        match spec {
            ColorSpec::Rgba { r, g, b, a } => Ok(Color::new(r, g, b, a)),
            ColorSpec::Array(arr) => match arr.as_slice() {
                &[r, g, b] => Ok(Color::new(r, g, b, 255)),
                &[r, g, b, a] => Ok(Color::new(r, g, b, a)),
                other => Err(invalid(format!("expected 3 or 4 channels, got {}", other.len()))),
            },
            ColorSpec::Text(s) => named_color(&s)
                .or_else(|| parse_hex_color(&s))
                .ok_or_else(|| invalid(format!("unrecognized color '{}'", s))),
        }
    }
}

/// Parse "#RRGGBB" or "#RRGGBBAA" (leading '#' optional).
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();

    match s.len() {
        6 => Some(Color::new(channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Some(Color::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().as_str() {
        "transparent" => Color::transparent(),
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::new(255, 0, 0, 255),
        "green" => Color::GREEN,
        "blue" => Color::new(0, 0, 255, 255),
        "yellow" => Color::YELLOW,
        "cyan" => Color::CYAN,
        "magenta" => Color::new(255, 0, 255, 255),
        "gray" | "grey" => Color::gray(128),
        _ => return None,
    };
    Some(color)
}
