use std::sync::Arc;

use pixfx_engine::surface::{BlendMode, Font, Paint, Rect, Shadow, Surface};
use pixfx_engine::{PixelBuffer, Rgb, Rgba};
use resvg::usvg;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use super::blur;
use crate::error::RenderError;

/// [`Surface`] backed by a tiny-skia pixmap.
///
/// Shapes are antialiased. Text glyphs are collected and rendered through
/// resvg in one SVG pass, using the configured font family from the shared
/// font database. Shapes with a shadow are collected into a batch: their
/// shadows go onto a separate layer that is blurred once and composited
/// beneath all shapes of the batch. A batch or glyph run is flushed before
/// any other kind of drawing, so overall drawing order is preserved.
///
/// Within a batch this differs from a canvas, which paints each shape right
/// after its own shadow: here a later shape's shadow never tints an earlier
/// shape of the same batch.
pub struct SkiaSurface {
    pixmap: Pixmap,
    fontdb: Arc<fontdb::Database>,
    font_family: String,
    shadows: Option<ShadowBatch>,
    glyphs: Vec<GlyphRun>,
    /// Size of the last `reset` whose pixmap could not be allocated.
    failed_allocation: Option<(u32, u32)>,
}

struct ShadowBatch {
    blur: f32,
    layer: Pixmap,
    shapes: Vec<(Path, Paint)>,
}

struct GlyphRun {
    text: String,
    cx: f32,
    cy: f32,
    font: Font,
    color: Rgba,
}

impl SkiaSurface {
    pub fn new(
        width: u32,
        height: u32,
        fontdb: Arc<fontdb::Database>,
        font_family: impl Into<String>,
    ) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation { width, height })?;
        Ok(Self {
            pixmap,
            fontdb,
            font_family: font_family.into(),
            shadows: None,
            glyphs: Vec::new(),
            failed_allocation: None,
        })
    }

    /// Surface without any fonts; glyphs render as nothing.
    pub fn without_fonts(width: u32, height: u32) -> Result<Self, RenderError> {
        Self::new(width, height, Arc::new(fontdb::Database::new()), "monospace")
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fails if the last reset could not allocate a pixmap of the requested
    /// size, in which case the snapshot has the wrong geometry.
    pub fn ensure_allocated(&self) -> Result<(), RenderError> {
        match self.failed_allocation {
            Some((width, height)) => Err(RenderError::PixmapAllocation { width, height }),
            None => Ok(()),
        }
    }

    fn skia_paint(color: Rgba, blend: BlendMode) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.alpha_u8());
        paint.anti_alias = true;
        paint.blend_mode = match blend {
            BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
            BlendMode::Darken => tiny_skia::BlendMode::Darken,
        };
        paint
    }

    fn fill_path_on(target: &mut Pixmap, path: &Path, color: Rgba, blend: BlendMode) {
        target.fill_path(
            path,
            &Self::skia_paint(color, blend),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn draw_shape(&mut self, path: Path, paint: &Paint) {
        let shadow = paint
            .shadow
            .filter(|s| s.blur > 0.0 && s.color.a > 0.0 && paint.color.a > 0.0);
        let Some(shadow) = shadow else {
            self.flush();
            Self::fill_path_on(&mut self.pixmap, &path, paint.color, paint.blend);
            return;
        };

        self.flush_glyphs();
        if self.shadows.as_ref().is_some_and(|b| b.blur != shadow.blur) {
            self.flush_shadows();
        }
        if self.shadows.is_none() {
            match Pixmap::new(self.width(), self.height()) {
                Some(layer) => {
                    self.shadows = Some(ShadowBatch {
                        blur: shadow.blur,
                        layer,
                        shapes: Vec::new(),
                    })
                }
                None => {
                    tracing::warn!("Failed to allocate shadow layer, drawing without shadow");
                    Self::fill_path_on(&mut self.pixmap, &path, paint.color, paint.blend);
                    return;
                }
            }
        }

        if let Some(batch) = self.shadows.as_mut() {
            // The shadow takes the shape's coverage, so its alpha scales
            // with the fill alpha
            let mut color = shadow.color;
            color.a *= paint.color.a;
            Self::fill_path_on(&mut batch.layer, &path, color, BlendMode::SourceOver);
            batch.shapes.push((path, *paint));
        }
    }

    fn flush(&mut self) {
        self.flush_shadows();
        self.flush_glyphs();
    }

    fn flush_shadows(&mut self) {
        let Some(mut batch) = self.shadows.take() else {
            return;
        };
        let radius = blur::radius_for_shadow(batch.blur);
        let (width, height) = (batch.layer.width(), batch.layer.height());
        blur::gaussian_approx(batch.layer.data_mut(), width, height, radius);

        self.pixmap.draw_pixmap(
            0,
            0,
            batch.layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        for (path, paint) in &batch.shapes {
            Self::fill_path_on(&mut self.pixmap, path, paint.color, paint.blend);
        }
        tracing::trace!(shapes = batch.shapes.len(), radius, "Flushed shadow batch");
    }

    fn flush_glyphs(&mut self) {
        if self.glyphs.is_empty() {
            return;
        }
        let svg = self.glyph_svg();
        self.glyphs.clear();

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        match usvg::Tree::from_data(svg.as_bytes(), &options) {
            Ok(tree) => resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut()),
            Err(e) => tracing::warn!(%e, "Failed to render glyphs"),
        }
    }

    fn glyph_svg(&self) -> String {
        let (w, h) = (self.width(), self.height());
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let family = xml_escape(&self.family_list());
        for glyph in &self.glyphs {
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" fill-opacity="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                glyph.cx,
                glyph.cy,
                family,
                glyph.font.size,
                if glyph.font.bold { "bold" } else { "normal" },
                glyph.color.rgb(),
                glyph.color.a.clamp(0.0, 1.0),
                xml_escape(&glyph.text),
            ));
        }
        svg.push_str("</svg>");
        svg
    }

    /// CSS family list for glyphs: the configured family, then `monospace`
    /// when the configured one is not already generic.
    fn family_list(&self) -> String {
        match self.font_family.as_str() {
            "monospace" | "serif" | "sans-serif" | "cursive" | "fantasy" => {
                self.font_family.clone()
            }
            name => format!("'{name}', monospace"),
        }
    }

    /// Drop pending work that a full overwrite would hide anyway.
    fn discard_pending(&mut self) {
        self.shadows = None;
        self.glyphs.clear();
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Multiply premultiplied pixels by `color`, keeping alpha.
fn tint(data: &mut [u8], color: Rgb) {
    let [r, g, b] = color.to_array();
    for px in data.chunks_exact_mut(4) {
        px[0] = (px[0] as u16 * r as u16 / 255) as u8;
        px[1] = (px[1] as u16 * g as u16 / 255) as u8;
        px[2] = (px[2] as u16 * b as u16 / 255) as u8;
    }
}

impl Surface for SkiaSurface {
    fn reset(&mut self, width: u32, height: u32) {
        self.discard_pending();
        match Pixmap::new(width, height) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                self.failed_allocation = None;
            }
            None => {
                tracing::error!(width, height, "Failed to allocate pixmap, clearing existing one");
                self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
                self.failed_allocation = Some((width, height));
            }
        }
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        self.discard_pending();
        if (pixels.width(), pixels.height()) != (self.width(), self.height()) {
            self.reset(pixels.width(), pixels.height());
        }
        for (dst, src) in self.pixmap.pixels_mut().iter_mut().zip(pixels.pixels()) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
    }

    fn fill(&mut self, color: Rgb) {
        self.discard_pending();
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        else {
            return;
        };
        self.draw_shape(PathBuilder::from_rect(rect), paint);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.draw_shape(path, paint);
        }
    }

    fn fill_glyph(&mut self, text: &str, cx: f32, cy: f32, font: &Font, paint: &Paint) {
        self.flush_shadows();
        self.glyphs.push(GlyphRun {
            text: text.to_string(),
            cx,
            cy,
            font: *font,
            color: paint.color,
        });
    }

    fn glow(&mut self, glow: &Shadow) {
        self.flush();
        let radius = blur::radius_for_shadow(glow.blur);
        if radius == 0 || glow.color.a <= 0.0 {
            return;
        }
        let mut layer = self.pixmap.clone();
        let (width, height) = (layer.width(), layer.height());
        blur::gaussian_approx(layer.data_mut(), width, height, radius);
        tint(layer.data_mut(), glow.color.rgb());

        self.pixmap.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint {
                opacity: glow.color.a.clamp(0.0, 1.0),
                blend_mode: tiny_skia::BlendMode::Screen,
                quality: FilterQuality::Nearest,
            },
            Transform::identity(),
            None,
        );
    }

    fn snapshot(&mut self) -> PixelBuffer {
        self.flush();
        let mut out = PixelBuffer::blank(self.width(), self.height());
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            dst.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }
}
