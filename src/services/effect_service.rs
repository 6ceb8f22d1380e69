use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use pixfx_engine::{catalog, ParamSet, PixelBuffer, Registry};

use crate::error::RenderError;
use crate::models::AppConfig;
use crate::rendering::{decode_png, encode_png, optimize_png, SkiaSurface};

/// Applies catalog effects to images using the tiny-skia surface.
///
/// Owns the font database used for ASCII glyphs; it is loaded once and
/// shared by every surface this service creates.
pub struct EffectService {
    registry: &'static Registry,
    fontdb: Arc<fontdb::Database>,
    font_family: String,
    optimize_png: bool,
}

impl EffectService {
    pub fn new(config: &AppConfig) -> Self {
        let mut fontdb = fontdb::Database::new();

        if let Some(dir) = &config.fonts_dir {
            fontdb.load_fonts_dir(dir);
            tracing::debug!(dir = %dir.display(), "Loaded fonts directory");
        }
        if config.system_fonts {
            fontdb.load_system_fonts();
        }
        resolve_monospace_family(&mut fontdb);

        tracing::info!(
            font_count = fontdb.len(),
            font_family = %config.font_family,
            "Loaded fonts for glyph rendering"
        );

        Self::with_fonts(Arc::new(fontdb), config)
    }

    /// Build a service around an already loaded font database.
    pub fn with_fonts(fontdb: Arc<fontdb::Database>, config: &AppConfig) -> Self {
        Self {
            registry: catalog(),
            fontdb,
            font_family: config.font_family.clone(),
            optimize_png: config.optimize_png,
        }
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Access the font database faces
    pub fn font_faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.fontdb.faces()
    }

    /// A fresh surface of the given size sharing this service's fonts.
    pub fn surface(&self, width: u32, height: u32) -> Result<SkiaSurface, RenderError> {
        SkiaSurface::new(width, height, self.fontdb.clone(), self.font_family.clone())
    }

    /// Apply effect `id` to a decoded buffer.
    pub fn apply(
        &self,
        id: &str,
        source: &PixelBuffer,
        params: &ParamSet,
    ) -> Result<PixelBuffer, RenderError> {
        let mut surface = self.surface(source.width(), source.height())?;
        let output = self.registry.process(id, source, params, &mut surface)?;
        surface.ensure_allocated()?;
        Ok(output)
    }

    /// Decode PNG bytes, apply effect `id`, and encode the result as PNG.
    pub fn apply_png(
        &self,
        id: &str,
        png_bytes: &[u8],
        params: &ParamSet,
    ) -> Result<Vec<u8>, RenderError> {
        let start = Instant::now();
        let source = decode_png(png_bytes)?;
        let output = self.apply(id, &source, params)?;
        let mut encoded = encode_png(&output)?;
        if self.optimize_png {
            encoded = optimize_png(encoded);
        }
        tracing::info!(
            effect = id,
            width = source.width(),
            height = source.height(),
            bytes = encoded.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered effect"
        );
        Ok(encoded)
    }

    /// Read `input`, apply effect `id`, and write the PNG to `output`.
    pub fn apply_file(
        &self,
        id: &str,
        input: &Path,
        output: &Path,
        params: &ParamSet,
    ) -> Result<(), RenderError> {
        let png_bytes = std::fs::read(input)?;
        let encoded = self.apply_png(id, &png_bytes, params)?;
        std::fs::write(output, encoded)?;
        Ok(())
    }
}

/// Point the generic `monospace` family at a loaded face.
///
/// fontdb maps `monospace` to "Courier New" out of the box, which most Linux
/// hosts lack; glyphs would then silently render as nothing. Prefers a
/// monospaced face, else any face.
pub fn resolve_monospace_family(fontdb: &mut fontdb::Database) {
    let query = fontdb::Query {
        families: &[fontdb::Family::Monospace],
        ..Default::default()
    };
    if fontdb.query(&query).is_some() {
        return;
    }
    let family = fontdb
        .faces()
        .find(|face| face.monospaced)
        .or_else(|| fontdb.faces().next())
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());

    match family {
        Some(name) => {
            tracing::debug!(family = %name, "Using loaded face for monospace");
            fontdb.set_monospace_family(name);
        }
        None => tracing::warn!("No fonts loaded, ASCII glyphs will not render"),
    }
}
