//! Color types and conversion utilities
//!
//! Everything here is stateless and works on sRGB-style 8-bit channels.
//! No gamma decoding is applied: brightness is computed directly on the
//! stored channel values, which is what the effects expect.
//!
//! # Example
//!
//! ```
//! use pixfx_engine::{luminance, Cmyk, Rgb};
//!
//! let orange = Rgb::from_hex("#ff8000").unwrap();
//! let k = Cmyk::from(orange).k;
//! assert_eq!(k, 0.0);
//! assert!(luminance(255.0, 255.0, 255.0) == 255.0);
//! ```

mod cmyk;
mod luminance;
mod rgb;

pub use cmyk::Cmyk;
pub use luminance::luminance;
pub use rgb::{Rgb, Rgba};
