//! Custom assertions for effect output.

use pixfx::engine::PixelBuffer;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.len() > 8 && bytes[..8] == PNG_SIGNATURE,
        "Expected PNG data, got {} bytes",
        bytes.len()
    );
}

pub fn assert_geometry(buffer: &PixelBuffer, width: u32, height: u32) {
    assert_eq!(
        (buffer.width(), buffer.height()),
        (width, height),
        "Unexpected output geometry"
    );
    assert_eq!(buffer.as_bytes().len(), (width * height * 4) as usize);
}

/// Every pixel is one of `colors`.
pub fn assert_only_colors(buffer: &PixelBuffer, colors: &[[u8; 4]]) {
    for (i, pixel) in buffer.pixels().enumerate() {
        assert!(
            colors.iter().any(|c| pixel == c),
            "Pixel {i} is {pixel:?}, expected one of {colors:?}"
        );
    }
}
