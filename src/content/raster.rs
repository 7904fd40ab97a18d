use std::sync::{Arc, OnceLock};

use kurbo::Shape as _;

use crate::{
    content::{
        bitmap::Bitmap,
        color::Color,
        model::{Content, ShapeKind},
        text,
    },
    foundation::core::{BezPath, Rect},
    foundation::error::{ConfettiError, ConfettiResult},
};

/// Edge length of the square shape sprites.
pub const DEFAULT_SPRITE_SIZE: f64 = 12.0;

/// Rasterized content: a tint-independent bitmap plus the tint to apply at emission time.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Sprite pixels.
    pub bitmap: Bitmap,
    /// Tint multiplied into the sprite when particles are drawn.
    pub tint: Option<Color>,
}

/// Turns [`Content`] descriptors into sprites.
///
/// Rasterization is a pure function of the content; the only retained state is the font database,
/// loaded lazily on the first text sprite and shared afterwards.
pub struct ContentRasterizer {
    sprite_size: f64,
    font_family: String,
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl std::fmt::Debug for ContentRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRasterizer")
            .field("sprite_size", &self.sprite_size)
            .field("font_family", &self.font_family)
            .field("fontdb_loaded", &self.fontdb.get().is_some())
            .finish()
    }
}

impl Default for ContentRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_SPRITE_SIZE, "sans-serif")
    }
}

impl ContentRasterizer {
    /// Create a rasterizer for square shape sprites of `sprite_size` using system fonts.
    pub fn new(sprite_size: f64, font_family: impl Into<String>) -> Self {
        Self {
            sprite_size,
            font_family: font_family.into(),
            fontdb: OnceLock::new(),
        }
    }

    /// Create a rasterizer with an explicit font database instead of the system fonts.
    pub fn with_fontdb(
        sprite_size: f64,
        font_family: impl Into<String>,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> Self {
        let out = Self::new(sprite_size, font_family);
        let _ = out.fontdb.set(fontdb);
        out
    }

    /// Edge length of shape sprites.
    pub fn sprite_size(&self) -> f64 {
        self.sprite_size
    }

    /// Rasterize one content descriptor.
    ///
    /// Never fails: content that cannot be drawn degrades to an empty sprite so the rest of the
    /// burst still emits.
    #[tracing::instrument(level = "debug", skip(self, content))]
    pub fn rasterize(&self, content: &Content) -> Sprite {
        let bitmap = match content {
            Content::Shape(kind, _) => self.shape_bitmap(kind),
            Content::Image(bitmap, _) => Ok(bitmap.clone()),
            Content::Text(s, size) => {
                let db = self.fontdb.get_or_init(text::system_fontdb);
                text::rasterize_text(db, &self.font_family, s, *size)
            }
        };

        let bitmap = bitmap.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "content could not be rasterized; using empty sprite");
            Bitmap::empty()
        });

        Sprite {
            bitmap,
            tint: content.tint(),
        }
    }

    fn shape_bitmap(&self, kind: &ShapeKind) -> ConfettiResult<Bitmap> {
        let rect = Rect::new(0.0, 0.0, self.sprite_size, self.sprite_size);
        let path = shape_path(kind, rect);
        if !outline_is_drawable(&path) {
            return Ok(Bitmap::empty());
        }
        fill_white(&path, self.sprite_size)
    }
}

fn shape_path(kind: &ShapeKind, rect: Rect) -> BezPath {
    match kind {
        ShapeKind::Circle => kurbo::Ellipse::from_rect(rect).to_path(0.1),
        ShapeKind::Triangle => {
            let mut p = BezPath::new();
            p.move_to((rect.center().x, rect.y0));
            p.line_to((rect.x1, rect.y1));
            p.line_to((rect.x0, rect.y1));
            p.close_path();
            p
        }
        ShapeKind::Square => rect.to_path(0.1),
        ShapeKind::Custom(path) => path.clone(),
    }
}

fn outline_is_drawable(path: &BezPath) -> bool {
    use kurbo::PathEl;

    if path.elements().is_empty() {
        return false;
    }
    fn fin(p: &kurbo::Point) -> bool {
        p.x.is_finite() && p.y.is_finite()
    }

    let finite = path.elements().iter().all(|el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => fin(p),
        PathEl::QuadTo(p1, p2) => fin(p1) && fin(p2),
        PathEl::CurveTo(p1, p2, p3) => fin(p1) && fin(p2) && fin(p3),
        PathEl::ClosePath => true,
    });
    finite && path.bounding_box().area() > 0.0
}

fn fill_white(path: &BezPath, sprite_size: f64) -> ConfettiResult<Bitmap> {
    if !sprite_size.is_finite() || sprite_size <= 0.0 {
        return Err(ConfettiError::validation(
            "sprite size must be finite and > 0",
        ));
    }
    let side: u16 = (sprite_size.ceil() as u32)
        .try_into()
        .map_err(|_| ConfettiError::render("sprite size exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(side, side);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&crate::render::cpu::bezpath_to_cpu(path));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(side, side);
    ctx.render_to_pixmap(&mut pixmap);
    Bitmap::from_premul_rgba8(
        u32::from(side),
        u32::from(side),
        pixmap.data_as_u8_slice().to_vec(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/content/raster.rs"]
mod tests;
