//! Palette types and utilities
//!
//! This module provides the ordered color list used by nearest-color search,
//! the built-in palettes offered by the color dithering effect, and the
//! error types for color parsing and palette validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{named_palette, Palette, NAMED_PALETTES};
