pub mod blur;
pub mod png_io;
pub mod skia_surface;

pub use png_io::{decode_png, encode_png, optimize_png};
pub use skia_surface::SkiaSurface;
