//! Neon silhouette: glowing dots on black where the image is bright.

use crate::buffer::PixelBuffer;
use crate::color::{Rgb, Rgba};
use crate::error::EffectError;
use crate::params::ParamSpec;
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::{Paint, Shadow, Surface};

pub const NEON: EffectDefinition = EffectDefinition {
    id: "neon",
    name: "Neon Silhouette",
    description: "Sparse glowing dots on black where brightness passes a threshold",
    params: &[
        ParamSpec::range("dotSize", "Dot spacing", 2.0, 32.0, 1.0, 6.0),
        ParamSpec::range("threshold", "Threshold", 0.0, 255.0, 1.0, 100.0),
        ParamSpec::toggle("invert", "Invert", false),
    ],
    routine: run,
};

pub const DOT_FILL: Rgba = Rgba::new(200, 255, 255, 0.85);
pub const DOT_GLOW: Rgba = Rgba::new(0, 255, 255, 1.0);

/// Cell centers of the samples that pass the brightness test.
///
/// Every `spacing`-th pixel on both axes is sampled (the cell's top-left
/// pixel). A sample passes when its brightness is above `threshold`, or
/// below it when `invert` is set.
pub fn sample_dots(source: &PixelBuffer, spacing: u32, threshold: f64, invert: bool) -> Vec<(f32, f32)> {
    let spacing = spacing.max(1);
    let half = spacing as f32 / 2.0;
    let mut dots = Vec::new();
    for y in (0..source.height()).step_by(spacing as usize) {
        for x in (0..source.width()).step_by(spacing as usize) {
            let brightness = source.rgb(x, y).luminance();
            let pass = if invert {
                brightness < threshold
            } else {
                brightness > threshold
            };
            if pass {
                dots.push((x as f32 + half, y as f32 + half));
            }
        }
    }
    dots
}

fn run(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let spacing = inv.size("dotSize")?;
    let dots = sample_dots(
        inv.source(),
        spacing,
        inv.number("threshold")?,
        inv.flag("invert")?,
    );

    let size = spacing as f32;
    let paint = Paint::rgba(DOT_FILL).shadow(Shadow {
        blur: size * 2.0,
        color: DOT_GLOW,
    });

    surface.fill(Rgb::BLACK);
    for (cx, cy) in dots {
        surface.fill_circle(cx, cy, size / 2.0, &paint);
    }
    Ok(())
}
