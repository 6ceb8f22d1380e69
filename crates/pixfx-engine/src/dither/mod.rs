//! Error diffusion dithering.
//!
//! Two effects share one raster-scan quantizer:
//!
//! - **Palette dither** ([`dither_palette`]): each pixel snaps to the
//!   nearest entry of a fixed retro palette.
//! - **Two-tone dither** ([`dither_two_tone`]): brightness is compared
//!   against the 127.5 midpoint and the pixel becomes one of two colors.
//!
//! # Algorithm
//!
//! Pixels are visited top-to-bottom, left-to-right. The current value is
//! read from a floating-point scratch buffer (so propagated corrections are
//! not rounded away), quantized, written out, and the quantization error is
//! pushed to the not-yet-visited neighbors using the Floyd-Steinberg kernel:
//!
//! ```text
//!        X   7
//!    3   5   1      (/16, scaled by the diffusion strength)
//! ```
//!
//! Neighbors outside the image are skipped; there is no wraparound.
//!
//! Dithering is lossy: running it again on its own output does not give
//! back the input.

mod palette_dither;
mod two_tone;

pub use palette_dither::{dither_palette, DITHER};
pub use two_tone::{dither_two_tone, DITHER_BW, MIDPOINT};

use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// An error diffusion kernel.
///
/// Each entry `(dx, dy, weight)` sends `error * weight / divisor` to the
/// pixel at offset `(dx, dy)`. `dy` is never negative.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// Floyd-Steinberg kernel, 100% error propagation.
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Core error diffusion loop, generic over the number of scratch channels.
///
/// `scratch` holds one `[f32; C]` per pixel, initialized by the caller from
/// the source. `quantize` maps a (possibly error-adjusted) value to the
/// quantized level used for the error computation and the color written to
/// the output. The output starts as a copy of `source`, so alpha is kept.
pub(crate) fn error_diffuse<const C: usize>(
    source: &PixelBuffer,
    mut scratch: Vec<[f32; C]>,
    kernel: &Kernel,
    strength: f32,
    mut quantize: impl FnMut([f32; C]) -> ([f32; C], Rgb),
) -> PixelBuffer {
    let width = source.width() as usize;
    let height = source.height() as usize;
    debug_assert_eq!(scratch.len(), width * height);

    let strength = if strength.is_finite() {
        strength.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let divisor = kernel.divisor as f32;
    let mut output = source.clone();

    for y in 0..height {
        for x in 0..width {
            let value = scratch[y * width + x];
            let (level, color) = quantize(value);
            output.set_rgb(x as u32, y as u32, color);

            let mut error = [0.0f32; C];
            for c in 0..C {
                error[c] = value[c] - level[c];
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                let ny = y + dy as usize;
                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }
                let factor = weight as f32 / divisor * strength;
                let neighbor = &mut scratch[ny * width + nx as usize];
                for c in 0..C {
                    neighbor[c] += error[c] * factor;
                }
            }
        }
    }

    output
}
