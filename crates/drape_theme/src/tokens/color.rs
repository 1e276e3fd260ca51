//! Color values carried by semantic and component tokens

use serde::{Serialize, Serializer};
use std::fmt;

/// RGBA color with channels in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Parse the color notations accepted in token tables.
    ///
    /// Supports `#RGB`, `#RRGGBB`, `#RRGGBBAA` and the keyword `transparent`.
    /// Returns `None` for anything else.
    pub fn parse(src: &str) -> Option<Self> {
        let src = src.trim();
        if src.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }

        let digits = src.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            3 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                let expand = |nibble: u32| ((nibble << 4) | nibble) as f32 / 255.0;
                Some(Self::rgb(
                    expand((value >> 8) & 0xF),
                    expand((value >> 4) & 0xF),
                    expand(value & 0xF),
                ))
            }
            6 => Some(Self::from_hex(u32::from_str_radix(digits, 16).ok()?)),
            8 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_hex(value >> 8).with_alpha((value & 0xFF) as f32 / 255.0))
            }
            _ => None,
        }
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise
    pub fn to_hex_string(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a < 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                channel(self.a)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}",
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}
