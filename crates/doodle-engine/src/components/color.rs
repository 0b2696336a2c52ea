use std::fmt;
use serde::Deserialize;

/// A fill/stroke color: either a `#rrggbb` hex triplet or a backend-defined
/// identifier such as `"blue"`.
///
/// Only hex colors carry channel values, so only they can be interpolated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Color {
    Rgb(u8, u8, u8),
    Named(String),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Parse a color string. `#rrggbb` (any case) becomes `Rgb`, anything else
    /// is kept verbatim as `Named`.
    pub fn parse(s: &str) -> Self {
        Self::parse_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
    }

    /// Parse a strict `#rrggbb` hex triplet.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channel triple, if this is a hex color.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Color::Rgb(r, g, b) => Some((r, g, b)),
            Color::Named(_) => None,
        }
    }

    /// Interpolate each channel independently, truncating toward zero.
    pub fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> Color {
        let channel = |a: u8, b: u8| {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.clamp(0.0, 255.0) as u8
        };
        Color::Rgb(channel(from.0, to.0), channel(from.1, to.1), channel(from.2, to.2))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Named("blue".to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::parse(s)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::parse(&s)
    }
}
