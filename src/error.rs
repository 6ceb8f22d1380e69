use pixfx_engine::EffectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate pixmap: {width}x{height}")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG: {0}")]
    UnsupportedPng(String),

    #[error("SVG error: {0}")]
    Svg(String),

    #[error("Params file error: {0}")]
    Params(String),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_pixmap_allocation() {
        let error = RenderError::PixmapAllocation {
            width: 0,
            height: 10,
        };
        assert_eq!(error.to_string(), "Failed to allocate pixmap: 0x10");
    }

    #[test]
    fn test_render_error_png_decode() {
        let error = RenderError::PngDecode("Invalid signature".to_string());
        assert_eq!(error.to_string(), "PNG decode error: Invalid signature");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_render_error_from_effect_error() {
        let error: RenderError = EffectError::UnknownEffect("blur".to_string()).into();
        assert!(matches!(error, RenderError::Effect(_)));
        assert_eq!(error.to_string(), "unknown effect: blur");
    }

    #[test]
    fn test_render_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let error: RenderError = io.into();
        assert_eq!(error.to_string(), "IO error: missing.png");
    }
}
