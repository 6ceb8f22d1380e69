#![allow(clippy::module_inception, clippy::needless_range_loop)]

//! pixfx-engine: stylized raster effects
//!
//! A fixed catalog of parameterized pixel transforms: pixelation, error
//! diffusion dithering, halftone screens, ASCII art, luminance thresholds,
//! neon silhouettes and CRT modulation.
//!
//! # Quick Start
//!
//! [`process`] runs an effect from the built-in [`catalog`] against the
//! software surface:
//!
//! ```
//! use pixfx_engine::{ParamSet, PixelBuffer};
//!
//! let source = PixelBuffer::filled(4, 4, [128, 128, 128, 255]).unwrap();
//! let params = ParamSet::new().with("level", 128);
//! let out = pixfx_engine::process("threshold", &source, &params).unwrap();
//!
//! assert!(out.pixels().all(|p| p == [0, 0, 0, 255]));
//! ```
//!
//! # Effects and surfaces
//!
//! Every effect reads an immutable [`PixelBuffer`] and writes through a
//! [`Surface`](surface::Surface). Pixel-level effects (pixelate, dither,
//! threshold, CRT) hand a finished buffer to the surface; drawing effects
//! (halftone, ASCII, neon) describe shapes and glyphs and leave the actual
//! rasterization to the surface implementation. Text glyphs and soft
//! shadows need a real rendering backend; [`surface::SoftSurface`] only
//! records them.
//!
//! # Parameters
//!
//! Each [`EffectDefinition`] declares its parameters as [`ParamSpec`]s.
//! Before a routine runs, the caller's [`ParamSet`] is resolved against
//! them:
//!
//! - missing values take the declared default
//! - numbers outside the declared range are clamped
//! - a value of the wrong kind, a non-finite number, or an unlisted choice
//!   is an [`EffectError::InvalidParam`]
//! - malformed hex colors fall back to the declared default color
//! - keys the effect does not declare are ignored

pub mod buffer;
pub mod color;
pub mod dither;
pub mod effects;
pub mod error;
pub mod palette;
pub mod params;
pub mod registry;
pub mod surface;

mod domain_tests;

pub use buffer::{BufferError, PixelBuffer};
pub use color::{luminance, Cmyk, Rgb, Rgba};
pub use error::EffectError;
pub use palette::{named_palette, Palette, PaletteError};
pub use params::{ChoiceOption, ParamKind, ParamSet, ParamSpec, ParamValue};
pub use registry::{catalog, EffectDefinition, Invocation, Registry};

/// Run effect `id` from the built-in catalog on a fresh [`surface::SoftSurface`].
pub fn process(id: &str, source: &PixelBuffer, params: &ParamSet) -> Result<PixelBuffer, EffectError> {
    let mut surface = surface::SoftSurface::new(source.width(), source.height());
    catalog().process(id, source, params, &mut surface)
}
