//! Drawing surface port.
//!
//! Effects that render primitives (halftone dots, ASCII glyphs, neon
//! sparkles) do not rasterize anything themselves. They describe what to
//! draw through the [`Surface`] trait and the caller decides how it is
//! rendered. Pixel-level effects use [`Surface::put_pixels`] to hand over a
//! finished buffer.
//!
//! [`SoftSurface`] is the built-in implementation: a small rasterizer with
//! no font support that also records every call, which keeps the effects
//! testable without a real rendering backend.

mod soft;

pub use soft::{DrawOp, SoftSurface};

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::color::{Rgb, Rgba};

/// How a primitive combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BlendMode {
    /// Normal alpha compositing.
    #[default]
    SourceOver,
    /// Per-channel minimum of source and destination, used for
    /// subtractive-looking ink overlap.
    Darken,
}

/// A soft drop shadow drawn beneath a primitive (zero offset), i.e. a glow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shadow {
    /// Blur radius in pixels.
    pub blur: f32,
    pub color: Rgba,
}

/// Fill style for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Rgba,
    pub blend: BlendMode,
    pub shadow: Option<Shadow>,
}

impl Paint {
    /// Opaque source-over fill.
    pub fn solid(color: Rgb) -> Self {
        Self {
            color: color.into(),
            blend: BlendMode::SourceOver,
            shadow: None,
        }
    }

    pub fn rgba(color: Rgba) -> Self {
        Self {
            color,
            blend: BlendMode::SourceOver,
            shadow: None,
        }
    }

    pub fn blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }
}

/// Font request for glyph drawing. The family is chosen by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    /// Em size in pixels.
    pub size: f32,
    pub bold: bool,
}

/// Capability effects draw onto.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Implementations must not hold on to state between [`reset`](Surface::reset)
/// calls; the registry resets the surface before every invocation.
pub trait Surface {
    /// Resize and clear to transparent black.
    fn reset(&mut self, width: u32, height: u32);

    /// Replace the whole surface with `pixels` (same geometry).
    fn put_pixels(&mut self, pixels: &PixelBuffer);

    /// Fill the whole surface with an opaque color.
    fn fill(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);

    /// Draw `text` centered (horizontally and vertically) on `(cx, cy)`.
    fn fill_glyph(&mut self, text: &str, cx: f32, cy: f32, font: &Font, paint: &Paint);

    /// Presentation glow over the current contents.
    fn glow(&mut self, glow: &Shadow);

    /// Current contents as straight (non-premultiplied) RGBA.
    fn snapshot(&mut self) -> PixelBuffer;
}
