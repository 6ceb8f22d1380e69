//! pixfx - stylized raster effects
//!
//! Application layer around [`pixfx_engine`]: a tiny-skia drawing surface
//! with font-backed glyphs, PNG input and output, configuration, and an
//! off-thread preview worker. This library exposes modules for integration
//! testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use error::RenderError;
pub use pixfx_engine as engine;
