use crate::foundation::error::{ConfettiError, ConfettiResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Size of the host drawing surface, in surface units (one unit renders as one pixel).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
}

impl SurfaceSize {
    /// Zero-area surface, used before the overlay is attached to a host.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Build a size, sanitizing non-finite or negative extents to zero.
    pub fn new(width: f64, height: f64) -> Self {
        fn sane(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }

        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// Return `true` when either extent is zero.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Pixel dimensions used when compositing, rounded up.
    pub fn to_canvas_px(self) -> ConfettiResult<(u16, u16)> {
        fn px(v: f64, axis: &str) -> ConfettiResult<u16> {
            let v = v.ceil();
            if v > f64::from(u16::MAX) {
                return Err(ConfettiError::render(format!(
                    "surface {axis} {v} exceeds {}",
                    u16::MAX
                )));
            }
            Ok(v as u16)
        }

        Ok((px(self.width, "width")?, px(self.height, "height")?))
    }
}

impl From<SurfaceSize> for Size {
    fn from(s: SurfaceSize) -> Self {
        Size::new(s.width, s.height)
    }
}

/// Frames-per-second represented as a rational `num/den`.
///
/// Hosts drive [`crate::ConfettiOverlay::tick`] with `frame_duration_secs()` per display frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ConfettiResult<Self> {
        if den == 0 {
            return Err(ConfettiError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ConfettiError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque white, the neutral tint.
    pub fn white() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }

    /// Component-wise multiply of two premultiplied colors (sprite pixel × tint).
    pub fn modulate(self, tint: Self) -> Self {
        use crate::foundation::math::mul_div255_u8;

        Self {
            r: mul_div255_u8(u16::from(self.r), u16::from(tint.r)),
            g: mul_div255_u8(u16::from(self.g), u16::from(tint.g)),
            b: mul_div255_u8(u16::from(self.b), u16::from(tint.b)),
            a: mul_div255_u8(u16::from(self.a), u16::from(tint.a)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
