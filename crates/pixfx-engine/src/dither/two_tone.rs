//! Two-color (black/white style) dithering.

use super::{error_diffuse, FLOYD_STEINBERG};
use crate::buffer::PixelBuffer;
use crate::color::{luminance, Rgb};
use crate::error::EffectError;
use crate::params::ParamSpec;
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::Surface;

/// Brightness below which a pixel takes the dark color.
pub const MIDPOINT: f32 = 127.5;

/// Registry entry for the two-color dither.
pub const DITHER_BW: EffectDefinition = EffectDefinition {
    id: "dither-bw",
    name: "1-bit Dither",
    description: "Floyd-Steinberg dithering on brightness to two colors",
    params: &[
        ParamSpec::range("strength", "Diffusion strength", 0.0, 1.0, 0.05, 1.0),
        ParamSpec::color("darkColor", "Dark color", "#000000"),
        ParamSpec::color("lightColor", "Light color", "#ffffff"),
    ],
    routine: run,
};

fn run(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let strength = inv.number("strength")? as f32;
    let dark = inv.color("darkColor")?;
    let light = inv.color("lightColor")?;
    surface.put_pixels(&dither_two_tone(inv.source(), dark, light, strength));
    Ok(())
}

/// Dither brightness to two colors.
///
/// The scratch buffer holds one brightness value per pixel. Quantization
/// picks level 0 (`dark`) below [`MIDPOINT`] and level 255 (`light`)
/// otherwise; the error is measured against those levels, independent of
/// the actual output colors.
pub fn dither_two_tone(source: &PixelBuffer, dark: Rgb, light: Rgb, strength: f32) -> PixelBuffer {
    let scratch: Vec<[f32; 1]> = source
        .pixels()
        .map(|p| [luminance(p[0] as f64, p[1] as f64, p[2] as f64) as f32])
        .collect();

    error_diffuse(source, scratch, &FLOYD_STEINBERG, strength, |[value]: [f32; 1]| {
        if value < MIDPOINT {
            ([0.0], dark)
        } else {
            ([255.0], light)
        }
    })
}
