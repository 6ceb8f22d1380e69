//! PNG decoding to RGBA8 and encoding from it.

use std::io::Cursor;

use pixfx_engine::{EffectError, PixelBuffer};

use crate::error::RenderError;

/// Decode any 8-bit-or-less PNG (gray, gray+alpha, RGB, RGBA, indexed) to
/// straight RGBA8. 16-bit samples are truncated to 8 bits.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let data = &buf[..frame.buffer_size()];

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedPng(format!(
            "bit depth {:?} after normalization",
            frame.bit_depth
        )));
    }

    let rgba: Vec<u8> = match frame.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::UnsupportedPng(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        color_type = ?frame.color_type,
        "Decoded PNG"
    );

    PixelBuffer::from_rgba(frame.width, frame.height, rgba)
        .map_err(|e| RenderError::Effect(EffectError::from(e)))
}

/// Encode an RGBA8 buffer as a PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress PNG bytes with oxipng. Falls back to the input if
/// optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_rgba_round_trip() {
        let source =
            PixelBuffer::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 128, 255, 64]).unwrap();
        let decoded = decode_png(&encode_png(&source).unwrap()).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_decode_rgb_is_opaque() {
        let png = encode_raw(2, 1, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let decoded = decode_png(&png).unwrap();
        assert_eq!(decoded.as_bytes(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_decode_grayscale_alpha() {
        let png = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[90, 10]);
        assert_eq!(decode_png(&png).unwrap().as_bytes(), &[90, 90, 90, 10]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_png(b"not a png"),
            Err(RenderError::PngDecode(_))
        ));
    }

    #[test]
    fn test_optimized_png_still_decodes() {
        let source = PixelBuffer::filled(8, 8, [10, 200, 30, 255]).unwrap();
        let optimized = optimize_png(encode_png(&source).unwrap());
        assert_eq!(decode_png(&optimized).unwrap(), source);
    }
}
