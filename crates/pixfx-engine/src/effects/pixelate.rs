//! Pixelate and duotone pixelate.

use super::blocks::{average_brightness, average_color, paint_blocks};
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::error::EffectError;
use crate::params::ParamSpec;
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::Surface;

pub const PIXELATE: EffectDefinition = EffectDefinition {
    id: "pixelate",
    name: "Pixelate",
    description: "Flat blocks of the average block color",
    params: &[ParamSpec::range("blockSize", "Block size", 2.0, 64.0, 1.0, 8.0)],
    routine: run_pixelate,
};

pub const DUOTONE: EffectDefinition = EffectDefinition {
    id: "duotone",
    name: "Duotone Pixelate",
    description: "Blocks painted in one of two colors by average brightness",
    params: &[
        ParamSpec::range("blockSize", "Block size", 2.0, 64.0, 1.0, 8.0),
        ParamSpec::range("threshold", "Threshold", 0.0, 255.0, 1.0, 128.0),
        ParamSpec::color("darkColor", "Dark color", "#1b1b3a"),
        ParamSpec::color("lightColor", "Light color", "#f4d35e"),
    ],
    routine: run_duotone,
};

fn run_pixelate(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    surface.put_pixels(&pixelate(inv.source(), inv.size("blockSize")?));
    Ok(())
}

fn run_duotone(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let output = duotone(
        inv.source(),
        inv.size("blockSize")?,
        inv.number("threshold")?,
        inv.color("darkColor")?,
        inv.color("lightColor")?,
    );
    surface.put_pixels(&output);
    Ok(())
}

/// Replace every block with its average color.
pub fn pixelate(source: &PixelBuffer, size: u32) -> PixelBuffer {
    paint_blocks(source, size, |block| average_color(source, block))
}

/// Blocks brighter than `threshold` become `light`, the rest `dark`.
pub fn duotone(source: &PixelBuffer, size: u32, threshold: f64, dark: Rgb, light: Rgb) -> PixelBuffer {
    paint_blocks(source, size, |block| {
        if average_brightness(source, block) > threshold {
            light
        } else {
            dark
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixelate_block_is_flat() {
        let source = PixelBuffer::from_rgba(
            2,
            2,
            vec![
                0, 0, 0, 255, 200, 0, 0, 255, //
                0, 100, 0, 255, 0, 0, 40, 255,
            ],
        )
        .unwrap();
        let out = pixelate(&source, 2);
        assert!(out.pixels().all(|p| p == [50, 25, 10, 255]));
    }

    #[test]
    fn test_pixelate_size_one_keeps_colors() {
        let source = PixelBuffer::from_rgba(2, 1, vec![1, 2, 3, 40, 4, 5, 6, 50]).unwrap();
        let out = pixelate(&source, 1);
        assert_eq!(out.as_bytes(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_duotone_threshold_is_strict() {
        let source = PixelBuffer::filled(4, 4, [128, 128, 128, 255]).unwrap();
        let dark = Rgb::new(1, 1, 1);
        let light = Rgb::new(9, 9, 9);
        assert!(duotone(&source, 4, 128.0, dark, light)
            .pixels()
            .all(|p| p == [1, 1, 1, 255]));
        assert!(duotone(&source, 4, 127.0, dark, light)
            .pixels()
            .all(|p| p == [9, 9, 9, 255]));
    }
}
