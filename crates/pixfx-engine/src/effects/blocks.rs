//! Block partitioning and per-block averages.
//!
//! The image is cut into `size × size` blocks in raster order. Blocks on the
//! right and bottom edges are clipped to the image, and averages only cover
//! the pixels that are actually inside.

use crate::buffer::PixelBuffer;
use crate::color::{luminance, Rgb};

/// One block, already clipped to the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Block {
    /// Center of the clipped block.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    fn pixel_count(&self) -> f64 {
        (self.width * self.height) as f64
    }

    fn coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Iterate the blocks of a `width × height` image. `size` is clamped to at
/// least 1.
pub fn blocks(width: u32, height: u32, size: u32) -> impl Iterator<Item = Block> {
    let size = size.max(1);
    (0..height).step_by(size as usize).flat_map(move |y| {
        (0..width).step_by(size as usize).map(move |x| Block {
            x,
            y,
            width: size.min(width - x),
            height: size.min(height - y),
        })
    })
}

/// Mean RGB over the block, each channel rounded.
pub fn average_color(buffer: &PixelBuffer, block: &Block) -> Rgb {
    let mut sum = [0u64; 3];
    for (x, y) in block.coords() {
        let [r, g, b, _] = buffer.pixel(x, y);
        sum[0] += r as u64;
        sum[1] += g as u64;
        sum[2] += b as u64;
    }
    let n = block.pixel_count();
    let channel = |s: u64| (s as f64 / n).round() as u8;
    Rgb::new(channel(sum[0]), channel(sum[1]), channel(sum[2]))
}

/// Mean luminance over the block, unrounded.
pub fn average_brightness(buffer: &PixelBuffer, block: &Block) -> f64 {
    let total: f64 = block
        .coords()
        .map(|(x, y)| {
            let [r, g, b, _] = buffer.pixel(x, y);
            luminance(r as f64, g as f64, b as f64)
        })
        .sum();
    total / block.pixel_count()
}

/// Copy of `source` with every block painted solid by `paint`. Output is
/// opaque.
pub(crate) fn paint_blocks(
    source: &PixelBuffer,
    size: u32,
    mut paint: impl FnMut(&Block) -> Rgb,
) -> PixelBuffer {
    let mut output = source.clone();
    for block in blocks(source.width(), source.height(), size) {
        let [r, g, b] = paint(&block).to_array();
        for (x, y) in block.coords() {
            output.set_pixel(x, y, [r, g, b, 255]);
        }
    }
    output
}
