use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced when parsing a `#RRGGBB` / `#RRGGBBAA` color string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("expected 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digits in {0:?}")]
    InvalidDigit(String),
}

/// A straight (non-premultiplied) 8-bit RGBA color, the pixel format of the raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parses `#RRGGBB` (alpha 255) or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_owned()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_owned()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(hex.to_owned()))
        };

        match digits.len() {
            6 => Ok(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            len => Err(ColorParseError::InvalidLength(len)),
        }
    }

    /// `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Per-channel absolute difference test. A tolerance of 0 is an exact match.
    pub fn matches(self, other: Self, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
            && self.a.abs_diff(other.a) <= tolerance
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        color.to_hex()
    }
}

impl From<Color32> for Rgba8 {
    fn from(color: Color32) -> Self {
        Self::from_array(color.to_srgba_unmultiplied())
    }
}

impl From<Rgba8> for Color32 {
    fn from(color: Rgba8) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_eight_digit_hex() {
        assert_eq!(Rgba8::from_hex("#FF0000"), Ok(Rgba8::opaque(255, 0, 0)));
        assert_eq!(Rgba8::from_hex("#00ff0080"), Ok(Rgba8::new(0, 255, 0, 128)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(
            Rgba8::from_hex("FF0000"),
            Err(ColorParseError::MissingHash("FF0000".into()))
        );
        assert_eq!(Rgba8::from_hex("#FFF"), Err(ColorParseError::InvalidLength(3)));
        assert!(matches!(
            Rgba8::from_hex("#GG0000"),
            Err(ColorParseError::InvalidDigit(_))
        ));
        assert!(matches!(
            Rgba8::from_hex("#é00000"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn hex_formatting_drops_opaque_alpha() {
        assert_eq!(Rgba8::opaque(0x12, 0xAB, 0x00).to_hex(), "#12AB00");
        assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn tolerance_is_per_channel() {
        let base = Rgba8::new(100, 100, 100, 255);
        assert!(base.matches(Rgba8::new(110, 90, 105, 250), 10));
        assert!(!base.matches(Rgba8::new(111, 100, 100, 255), 10));
        assert!(!base.matches(Rgba8::new(101, 100, 100, 255), 0));
    }

    #[test]
    fn opaque_colors_survive_color32_conversion() {
        let color = Rgba8::opaque(12, 34, 56);
        assert_eq!(Rgba8::from(Color32::from(color)), color);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgba8::opaque(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let back: Rgba8 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba8::opaque(255, 0, 0));
    }
}
