//! Subtractive CMYK separation used by the color halftone.

use super::Rgb;

/// CMYK components, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    /// Convert floating-point RGB (0..=255 scale) to CMYK.
    ///
    /// Pure black short-circuits to `(0, 0, 0, 1)` so the `1 - k` divisor
    /// is never zero.
    pub fn from_rgb_f64(r: f64, g: f64, b: f64) -> Self {
        let r = (r / 255.0).clamp(0.0, 1.0);
        let g = (g / 255.0).clamp(0.0, 1.0);
        let b = (b / 255.0).clamp(0.0, 1.0);

        let k = 1.0 - r.max(g).max(b);
        if k >= 1.0 {
            return Self {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0,
            };
        }

        let inv = 1.0 - k;
        Self {
            c: (1.0 - r - k) / inv,
            m: (1.0 - g - k) / inv,
            y: (1.0 - b - k) / inv,
            k,
        }
    }
}

impl From<Rgb> for Cmyk {
    fn from(color: Rgb) -> Self {
        Self::from_rgb_f64(color.r as f64, color.g as f64, color.b as f64)
    }
}
