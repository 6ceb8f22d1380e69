//! Test images and services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pixfx::engine::PixelBuffer;
use pixfx::models::AppConfig;
use pixfx::rendering::encode_png;
use pixfx::services::EffectService;

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::blank(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.saturating_sub(1).max(1)) as u8;
            let g = (y * 255 / height.saturating_sub(1).max(1)) as u8;
            buffer.set_pixel(x, y, [r, g, 128, 255]);
        }
    }
    buffer
}

/// Left half one color, right half another.
pub fn split(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> PixelBuffer {
    let mut buffer = PixelBuffer::blank(width, height);
    for y in 0..height {
        for x in 0..width {
            buffer.set_pixel(x, y, if x < width / 2 { left } else { right });
        }
    }
    buffer
}

pub fn png_bytes(buffer: &PixelBuffer) -> Vec<u8> {
    encode_png(buffer).expect("encode fixture")
}

/// Write `buffer` as `name` inside `dir` and return the path.
pub fn write_png(dir: &Path, name: &str, buffer: &PixelBuffer) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(buffer)).expect("write fixture");
    path
}

/// Service without system fonts, so tests do not depend on the host.
pub fn service() -> EffectService {
    let config = AppConfig {
        system_fonts: false,
        ..AppConfig::default()
    };
    EffectService::with_fonts(Arc::new(fontdb::Database::new()), &config)
}
