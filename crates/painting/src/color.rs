//! Paint colors
//!
//! Colors arrive from the UI as CSS-style hex strings and are stored as
//! sRGB floats so the renderer can hand them straight to a material.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex color length {len} in {input:?}")]
    InvalidLength { input: String, len: usize },
    #[error("Invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// An opaque sRGB color with channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for PaintColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl PaintColor {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Create a color from channels already in 0.0-1.0
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(input.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidDigit(input.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let expand = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::from_rgb8(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            len => Err(ColorError::InvalidLength {
                input: input.to_string(),
                len,
            }),
        }
    }

    /// 8-bit channels, rounded
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| (v * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for PaintColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PaintColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Colors reachable from the number-key hotkeys, in key order
pub const PALETTE: [PaintColor; 4] = [
    PaintColor::rgb(1.0, 0.0, 0.0),
    PaintColor::rgb(0.0, 1.0, 0.0),
    PaintColor::rgb(0.0, 0.0, 1.0),
    PaintColor::rgb(1.0, 1.0, 0.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let color = PaintColor::from_hex("#ff0000").unwrap();
        assert_eq!(color, PaintColor::rgb(1.0, 0.0, 0.0));
        assert_eq!(color.to_hex(), "#ff0000");
    }

    #[test]
    fn test_parse_without_hash_and_mixed_case() {
        let color: PaintColor = "00FF80".parse().unwrap();
        assert_eq!(color.to_rgb8(), [0, 255, 128]);
    }

    #[test]
    fn test_parse_short_hex() {
        let color = PaintColor::from_hex("#0f8").unwrap();
        assert_eq!(color.to_rgb8(), [0x00, 0xff, 0x88]);
    }

    #[test]
    fn test_reject_bad_input() {
        assert!(matches!(
            PaintColor::from_hex("#ff00"),
            Err(ColorError::InvalidLength { len: 4, .. })
        ));
        assert!(matches!(
            PaintColor::from_hex("#gg0000"),
            Err(ColorError::InvalidDigit(_))
        ));
        assert!(PaintColor::from_hex("").is_err());
    }
}
