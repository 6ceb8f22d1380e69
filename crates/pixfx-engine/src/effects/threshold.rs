//! Per-pixel luminance effects.

use crate::buffer::PixelBuffer;
use crate::color::luminance;
use crate::error::EffectError;
use crate::params::ParamSpec;
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::Surface;

pub const GRAYSCALE: EffectDefinition = EffectDefinition {
    id: "grayscale",
    name: "Grayscale",
    description: "Luminance gray, with pixels at or below a floor set to black",
    params: &[ParamSpec::range("threshold", "Black floor", 0.0, 255.0, 1.0, 0.0)],
    routine: run_grayscale,
};

pub const THRESHOLD: EffectDefinition = EffectDefinition {
    id: "threshold",
    name: "Threshold",
    description: "Pure black and white split at a luminance level",
    params: &[ParamSpec::range("level", "Level", 0.0, 255.0, 1.0, 128.0)],
    routine: run_threshold,
};

fn run_grayscale(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    surface.put_pixels(&grayscale(inv.source(), inv.number("threshold")?));
    Ok(())
}

fn run_threshold(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    surface.put_pixels(&threshold(inv.source(), inv.number("level")?));
    Ok(())
}

/// Rewrite RGB of every pixel from its luminance, keeping alpha.
fn map_luminance(source: &PixelBuffer, f: impl Fn(f64) -> u8) -> PixelBuffer {
    let mut output = source.clone();
    for px in output.pixels_mut() {
        let v = f(luminance(px[0] as f64, px[1] as f64, px[2] as f64));
        px[..3].fill(v);
    }
    output
}

/// Gray at the pixel's luminance when it exceeds `floor`, black otherwise.
pub fn grayscale(source: &PixelBuffer, floor: f64) -> PixelBuffer {
    map_luminance(source, |l| if l > floor { l.round() as u8 } else { 0 })
}

/// White when luminance exceeds `level`, black otherwise.
pub fn threshold(source: &PixelBuffer, level: f64) -> PixelBuffer {
    map_luminance(source, |l| if l > level { 255 } else { 0 })
}
