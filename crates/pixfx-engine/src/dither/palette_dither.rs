//! Palette-based color dithering.

use super::{error_diffuse, FLOYD_STEINBERG};
use crate::buffer::PixelBuffer;
use crate::error::EffectError;
use crate::palette::{named_palette, Palette};
use crate::params::{ChoiceOption, ParamSpec};
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::Surface;

const PALETTES: &[ChoiceOption] = &[
    ChoiceOption::new("gameboy", "Game Boy"),
    ChoiceOption::new("cga", "CGA"),
    ChoiceOption::new("grayscale", "4-level gray"),
    ChoiceOption::new("sepia", "Sepia"),
];

/// Registry entry for the retro palette dither.
pub const DITHER: EffectDefinition = EffectDefinition {
    id: "dither",
    name: "Retro Dither",
    description: "Floyd-Steinberg dithering to a fixed four-color retro palette",
    params: &[
        ParamSpec::choice("palette", "Palette", PALETTES, "gameboy"),
        ParamSpec::range("strength", "Diffusion strength", 0.0, 1.0, 0.05, 1.0),
    ],
    routine: run,
};

fn run(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let palette = named_palette(inv.choice("palette")?)?;
    let strength = inv.number("strength")? as f32;
    surface.put_pixels(&dither_palette(inv.source(), &palette, strength));
    Ok(())
}

/// Dither `source` to `palette`, diffusing `strength` (0..=1) of the error.
///
/// Every output pixel is a palette color; alpha is copied from the source.
pub fn dither_palette(source: &PixelBuffer, palette: &Palette, strength: f32) -> PixelBuffer {
    let scratch: Vec<[f32; 3]> = source
        .pixels()
        .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
        .collect();

    error_diffuse(source, scratch, &FLOYD_STEINBERG, strength, |value| {
        let (_, color) = palette.nearest(value);
        (color.to_f32(), color)
    })
}
