//! 8-bit RGB colors and translucent paint colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::luminance;
use crate::palette::ParseColorError;

/// An opaque color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hex color, `#` optional, case-insensitive.
    ///
    /// Returns `None` on malformed input; callers pick their own fallback.
    ///
    /// ```
    /// use pixfx_engine::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#FF8000"), Some(Rgb::new(255, 128, 0)));
    /// assert_eq!(Rgb::from_hex("ff8000"), Some(Rgb::new(255, 128, 0)));
    /// assert_eq!(Rgb::from_hex("#f80"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex.parse().ok()
    }

    /// Parse a hex color, substituting `fallback` when it is malformed.
    pub fn from_hex_or(hex: &str, fallback: Rgb) -> Self {
        Self::from_hex(hex).unwrap_or(fallback)
    }

    /// Lower-case `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// BT.709 brightness on the 0..=255 scale.
    #[inline]
    pub fn luminance(self) -> f64 {
        luminance(self.r as f64, self.g as f64, self.b as f64)
    }

    /// Attach an alpha in `0.0..=1.0`.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, alpha)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(ParseColorError::InvalidLength(hex.len()));
        }
        // from_str_radix accepts a leading '+', reject anything that is not a digit
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ParseColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A paint color: 8-bit RGB plus a floating-point opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity, `0.0` transparent to `1.0` opaque.
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Alpha as an 8-bit value, rounded and clamped.
    #[inline]
    pub fn alpha_u8(self) -> u8 {
        (self.a * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(1.0)
    }
}
