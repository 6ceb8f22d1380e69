//! Ordered color palette with nearest-color matching.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

const GAMEBOY: [Rgb; 4] = [
    Rgb::new(0x0f, 0x38, 0x0f),
    Rgb::new(0x30, 0x62, 0x30),
    Rgb::new(0x8b, 0xac, 0x0f),
    Rgb::new(0x9b, 0xbc, 0x0f),
];

const CGA: [Rgb; 4] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x55, 0xff, 0xff),
    Rgb::new(0xff, 0x55, 0xff),
    Rgb::new(0xff, 0xff, 0xff),
];

const GRAYSCALE: [Rgb; 4] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x55, 0x55, 0x55),
    Rgb::new(0xaa, 0xaa, 0xaa),
    Rgb::new(0xff, 0xff, 0xff),
];

const SEPIA: [Rgb; 4] = [
    Rgb::new(0x2b, 0x1d, 0x0e),
    Rgb::new(0x6b, 0x44, 0x23),
    Rgb::new(0xb0, 0x8a, 0x5a),
    Rgb::new(0xf1, 0xe3, 0xc8),
];

/// Built-in palettes, by name. The first entry is the default.
pub const NAMED_PALETTES: &[(&str, &[Rgb])] = &[
    ("gameboy", &GAMEBOY),
    ("cga", &CGA),
    ("grayscale", &GRAYSCALE),
    ("sepia", &SEPIA),
];

/// Look up one of the [`NAMED_PALETTES`].
pub fn named_palette(name: &str) -> Result<Palette, PaletteError> {
    NAMED_PALETTES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .ok_or_else(|| PaletteError::UnknownName(name.to_string()))
        .and_then(|(_, colors)| Palette::new(colors))
}

/// An ordered, non-empty list of colors.
///
/// Matching uses squared Euclidean distance over the three channels. Order
/// matters: when two entries are equally close, the one listed first wins,
/// so results are deterministic.
///
/// # Example
///
/// ```
/// use pixfx_engine::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.nearest_rgb(Rgb::new(200, 200, 200)), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    // Channel values as floats, precomputed for the diffusion loop
    colors_f32: Vec<[f32; 3]>,
}

impl Palette {
    /// Create a palette from colors in priority order.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] if `colors` is empty.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self {
            colors: colors.to_vec(),
            colors_f32: colors.iter().map(|c| c.to_f32()).collect(),
        })
    }

    /// Create a palette from hex strings such as `"#0f380f"`.
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Find the entry closest to a floating-point color.
    ///
    /// Returns `(index, color)`. Ties resolve to the lowest index.
    #[inline]
    pub fn nearest(&self, color: [f32; 3]) -> (usize, Rgb) {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;

        for (i, p) in self.colors_f32.iter().enumerate() {
            let dr = color[0] - p[0];
            let dg = color[1] - p[1];
            let db = color[2] - p[2];
            let dist = dr * dr + dg * dg + db * db;
            // Strict comparison keeps the first of equally distant entries
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, self.colors[best_idx])
    }

    /// Nearest entry to an 8-bit color.
    #[inline]
    pub fn nearest_rgb(&self, color: Rgb) -> Rgb {
        self.nearest(color.to_f32()).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::Empty));
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);

        let err = Palette::from_hex(&["#000000", "#FFF"]).unwrap_err();
        assert!(matches!(err, PaletteError::ParseColor(_)));
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = named_palette("gameboy").unwrap();
        for (i, &c) in palette.colors().iter().enumerate() {
            assert_eq!(palette.nearest(c.to_f32()), (i, c));
        }
    }

    #[test]
    fn test_nearest_tie_prefers_first() {
        // (100,100,100) is exactly 50 away from both entries on every channel
        let palette = Palette::new(&[Rgb::new(50, 50, 50), Rgb::new(150, 150, 150)]).unwrap();
        assert_eq!(palette.nearest([100.0, 100.0, 100.0]).0, 0);

        let reversed = Palette::new(&[Rgb::new(150, 150, 150), Rgb::new(50, 50, 50)]).unwrap();
        assert_eq!(reversed.nearest([100.0, 100.0, 100.0]).0, 0);
    }

    #[test]
    fn test_nearest_out_of_range_values() {
        let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
        assert_eq!(palette.nearest([-80.0, -80.0, -80.0]).1, Rgb::BLACK);
        assert_eq!(palette.nearest([400.0, 300.0, 350.0]).1, Rgb::WHITE);
    }

    #[test]
    fn test_named_palettes() {
        for (name, colors) in NAMED_PALETTES {
            let palette = named_palette(name).unwrap();
            assert_eq!(palette.len(), colors.len());
        }
        assert_eq!(named_palette("CGA").unwrap().len(), 4);
        assert_eq!(
            named_palette("vga"),
            Err(PaletteError::UnknownName("vga".to_string()))
        );
    }
}
