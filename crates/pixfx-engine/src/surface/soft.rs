//! Reference software surface.
//!
//! Rectangles and circles are rasterized by sampling pixel centers (no
//! antialiasing). Shadows, glyphs and glow need a real backend; they are
//! recorded but leave no pixels behind.

use super::{BlendMode, Font, Paint, Rect, Shadow, Surface};
use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    PutPixels,
    Fill(Rgb),
    Rect {
        rect: Rect,
        paint: Paint,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        paint: Paint,
    },
    Glyph {
        text: String,
        cx: f32,
        cy: f32,
        font: Font,
        paint: Paint,
    },
    Glow(Shadow),
}

/// Dependency-free [`Surface`] that rasterizes simple shapes and records
/// every draw call.
///
/// # Example
///
/// ```
/// use pixfx_engine::surface::{Paint, Rect, SoftSurface, Surface};
/// use pixfx_engine::Rgb;
///
/// let mut surface = SoftSurface::new(4, 4);
/// surface.fill(Rgb::BLACK);
/// surface.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &Paint::solid(Rgb::WHITE));
/// let out = surface.snapshot();
/// assert_eq!(out.pixel(1, 1), [255, 255, 255, 255]);
/// assert_eq!(out.pixel(2, 2), [0, 0, 0, 255]);
/// assert_eq!(surface.ops().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SoftSurface {
    pixels: PixelBuffer,
    ops: Vec<DrawOp>,
}

impl SoftSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: PixelBuffer::blank(width, height),
            ops: Vec::new(),
        }
    }

    /// Calls recorded since the last reset.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Blend `paint` into pixel (x, y).
    fn blend_pixel(&mut self, x: u32, y: u32, paint: &Paint) {
        let alpha = paint.color.a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.pixels.pixel(x, y);
        let src = [paint.color.r, paint.color.g, paint.color.b];

        let mut out = [0u8; 4];
        for c in 0..3 {
            let s = match paint.blend {
                BlendMode::SourceOver => src[c],
                BlendMode::Darken => src[c].min(dst[c]),
            } as f32;
            let d = dst[c] as f32;
            out[c] = (s * alpha + d * (1.0 - alpha)).round() as u8;
        }
        let da = dst[3] as f32 / 255.0;
        out[3] = ((alpha + da * (1.0 - alpha)) * 255.0).round() as u8;
        self.pixels.set_pixel(x, y, out);
    }

    /// Pixel index range whose centers fall inside `[lo, hi)`.
    fn covered(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().clamp(0.0, limit as f32);
        if start >= end {
            return 0..0;
        }
        start as u32..end as u32
    }
}

impl Surface for SoftSurface {
    fn reset(&mut self, width: u32, height: u32) {
        self.pixels = PixelBuffer::blank(width, height);
        self.ops.clear();
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        self.ops.push(DrawOp::PutPixels);
        self.pixels = pixels.clone();
    }

    fn fill(&mut self, color: Rgb) {
        self.ops.push(DrawOp::Fill(color));
        let rgba = [color.r, color.g, color.b, 255];
        for px in self.pixels.pixels_mut() {
            px.copy_from_slice(&rgba);
        }
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::Rect {
            rect,
            paint: *paint,
        });
        let xs = Self::covered(rect.x, rect.x + rect.width, self.pixels.width());
        let ys = Self::covered(rect.y, rect.y + rect.height, self.pixels.height());
        for y in ys {
            for x in xs.clone() {
                self.blend_pixel(x, y, paint);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            paint: *paint,
        });
        if radius <= 0.0 {
            return;
        }
        let xs = Self::covered(cx - radius, cx + radius, self.pixels.width());
        let ys = Self::covered(cy - radius, cy + radius, self.pixels.height());
        let r2 = radius * radius;
        for y in ys {
            let dy = y as f32 + 0.5 - cy;
            for x in xs.clone() {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, paint);
                }
            }
        }
    }

    fn fill_glyph(&mut self, text: &str, cx: f32, cy: f32, font: &Font, paint: &Paint) {
        self.ops.push(DrawOp::Glyph {
            text: text.to_string(),
            cx,
            cy,
            font: *font,
            paint: *paint,
        });
    }

    fn glow(&mut self, glow: &Shadow) {
        self.ops.push(DrawOp::Glow(*glow));
    }

    fn snapshot(&mut self) -> PixelBuffer {
        self.pixels.clone()
    }
}
