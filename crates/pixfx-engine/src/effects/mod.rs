//! Block, point and displacement effects.
//!
//! Each submodule owns the [`EffectDefinition`](crate::registry::EffectDefinition)
//! constants for its effects and exposes the pure math behind them so it
//! can be tested without a surface.

pub mod ascii;
pub mod blocks;
pub mod crt;
pub mod halftone;
pub mod neon;
pub mod pixelate;
pub mod threshold;

pub use ascii::ASCII;
pub use crt::CRT;
pub use halftone::{HALFTONE, HALFTONE_CMYK};
pub use neon::NEON;
pub use pixelate::{DUOTONE, PIXELATE};
pub use threshold::{GRAYSCALE, THRESHOLD};
