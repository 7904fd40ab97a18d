use crate::{
    content::{bitmap::Bitmap, color::Color},
    foundation::core::BezPath,
};

/// Default glyph size for [`Content::text`].
pub const DEFAULT_TEXT_SIZE: f64 = 16.0;

/// Outline used for shape confetti.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// Ellipse inscribed in the sprite square.
    Circle,
    /// Isosceles triangle from the top middle to the bottom corners.
    Triangle,
    /// The full sprite square.
    Square,
    /// Caller-supplied outline in sprite coordinates.
    Custom(BezPath),
}

impl ShapeKind {
    /// Build a custom outline from SVG path data.
    ///
    /// Unparseable data yields an empty outline, which rasterizes to an empty sprite.
    pub fn custom_svg(d: &str) -> Self {
        match BezPath::from_svg(d.trim()) {
            Ok(path) => Self::Custom(path),
            Err(e) => {
                tracing::warn!(error = %e, "invalid custom shape path data; using empty outline");
                Self::Custom(BezPath::new())
            }
        }
    }
}

/// Content to be emitted as confetti.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// A shape filled white and tinted with `color` at emission time.
    Shape(ShapeKind, Color),
    /// A bitmap with an optional tint.
    Image(Bitmap, Option<Color>),
    /// A string of glyphs at a font size; glyph colors are baked into the sprite.
    Text(String, f64),
}

impl Content {
    /// Shape confetti of the given color.
    pub fn shape(kind: ShapeKind, color: Color) -> Self {
        Self::Shape(kind, color)
    }

    /// Image confetti with an optional tint.
    pub fn image(bitmap: Bitmap, tint: Option<Color>) -> Self {
        Self::Image(bitmap, tint)
    }

    /// Text confetti at [`DEFAULT_TEXT_SIZE`].
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into(), DEFAULT_TEXT_SIZE)
    }

    /// Text confetti at an explicit font size.
    pub fn text_sized(text: impl Into<String>, size: f64) -> Self {
        Self::Text(text.into(), size)
    }

    /// Tint applied to this content's sprite when emitted.
    pub fn tint(&self) -> Option<Color> {
        match self {
            Self::Shape(_, color) => Some(*color),
            Self::Image(_, tint) => *tint,
            Self::Text(..) => None,
        }
    }
}
