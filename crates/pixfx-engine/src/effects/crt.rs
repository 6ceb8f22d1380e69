//! CRT modulation: sinusoidal row displacement, channel aberration,
//! scanlines, and a glow handed to the surface.

use crate::buffer::PixelBuffer;
use crate::error::EffectError;
use crate::params::ParamSpec;
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::{Shadow, Surface};

pub const CRT: EffectDefinition = EffectDefinition {
    id: "crt",
    name: "CRT Modulation",
    description: "Wavy scan displacement with color fringing and scanlines",
    params: &[
        ParamSpec::range("amplitude", "Wave amplitude", 0.0, 40.0, 1.0, 4.0),
        ParamSpec::range("frequency", "Wave frequency", 0.0, 1.0, 0.01, 0.05),
        ParamSpec::range("aberration", "Color aberration", 0.0, 20.0, 1.0, 2.0),
        ParamSpec::toggle("scanlines", "Scanlines", true),
        ParamSpec::range("scanlineOpacity", "Scanline darkness", 0.0, 1.0, 0.05, 0.25),
        ParamSpec::range("glow", "Glow", 0.0, 30.0, 1.0, 6.0),
        ParamSpec::color("glowColor", "Glow color", "#66ffcc"),
    ],
    routine: run,
};

/// Pixel-level CRT settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    pub amplitude: f64,
    pub frequency: f64,
    pub aberration: f64,
    /// Darkening of odd rows, `None` for no scanlines.
    pub scanline_opacity: Option<f64>,
}

/// Apply displacement, aberration and scanlines. Output is opaque.
///
/// Row `y` is shifted by `sin(y * frequency) * amplitude`. Red samples
/// `aberration` further right, blue `aberration` further left; sample
/// columns are rounded and clamped to the row.
pub fn modulate(source: &PixelBuffer, settings: &Modulation) -> PixelBuffer {
    let width = source.width();
    let max_x = (width - 1) as f64;
    let column = |x: f64| x.round().clamp(0.0, max_x) as u32;
    let scanline = settings
        .scanline_opacity
        .map(|opacity| 1.0 - opacity.clamp(0.0, 1.0));

    let mut output = source.clone();
    for y in 0..source.height() {
        let offset = (y as f64 * settings.frequency).sin() * settings.amplitude;
        let factor = scanline.filter(|_| y % 2 == 1);
        for x in 0..width {
            let base = x as f64 + offset;
            let mut px = [
                source.pixel(column(base + settings.aberration), y)[0],
                source.pixel(column(base), y)[1],
                source.pixel(column(base - settings.aberration), y)[2],
                255,
            ];
            if let Some(factor) = factor {
                for c in &mut px[..3] {
                    *c = (*c as f64 * factor).round() as u8;
                }
            }
            output.set_pixel(x, y, px);
        }
    }
    output
}

fn run(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let settings = Modulation {
        amplitude: inv.number("amplitude")?,
        frequency: inv.number("frequency")?,
        aberration: inv.number("aberration")?,
        scanline_opacity: inv
            .flag("scanlines")?
            .then(|| inv.number("scanlineOpacity"))
            .transpose()?,
    };
    surface.put_pixels(&modulate(inv.source(), &settings));

    let glow = inv.number("glow")? as f32;
    if glow > 0.0 {
        surface.glow(&Shadow {
            blur: glow,
            color: inv.color("glowColor")?.into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSet;
    use crate::registry::catalog;
    use crate::surface::{DrawOp, SoftSurface};

    const FLAT: Modulation = Modulation {
        amplitude: 0.0,
        frequency: 0.05,
        aberration: 0.0,
        scanline_opacity: Some(0.0),
    };

    fn ramp(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| {
                let v = (i % width * 10) as u8;
                [v, v + 1, v + 2, 255]
            })
            .collect();
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_identity_on_opaque_source() {
        let source = ramp(6, 5);
        assert_eq!(modulate(&source, &FLAT), source);
    }

    #[test]
    fn test_aberration_splits_channels() {
        let source = ramp(6, 1);
        let out = modulate(
            &source,
            &Modulation {
                aberration: 1.0,
                ..FLAT
            },
        );
        // x=2: red from x=3, green from x=2, blue from x=1
        assert_eq!(out.pixel(2, 0), [30, 21, 12, 255]);
        // edges clamp instead of wrapping
        assert_eq!(out.pixel(0, 0), [10, 1, 2, 255]);
        assert_eq!(out.pixel(5, 0), [50, 51, 42, 255]);
    }

    #[test]
    fn test_scanlines_darken_odd_rows() {
        let source = PixelBuffer::filled(2, 2, [200, 100, 50, 255]).unwrap();
        let out = modulate(
            &source,
            &Modulation {
                scanline_opacity: Some(0.5),
                ..FLAT
            },
        );
        assert_eq!(out.pixel(0, 0), [200, 100, 50, 255]);
        assert_eq!(out.pixel(1, 1), [100, 50, 25, 255]);
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let source = PixelBuffer::filled(3, 3, [10, 20, 30, 0]).unwrap();
        assert!(modulate(&source, &FLAT).pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_glow_delegated_to_surface() {
        let source = PixelBuffer::filled(4, 4, [9, 9, 9, 255]).unwrap();
        let mut surface = SoftSurface::new(1, 1);
        catalog()
            .process("crt", &source, &ParamSet::new(), &mut surface)
            .unwrap();
        assert!(matches!(surface.ops().last(), Some(DrawOp::Glow(g)) if g.blur == 6.0));

        catalog()
            .process("crt", &source, &ParamSet::new().with("glow", 0), &mut surface)
            .unwrap();
        assert_eq!(surface.ops(), &[DrawOp::PutPixels]);
    }
}
