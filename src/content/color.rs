use crate::foundation::core::Rgba8Premul;

/// Straight-alpha color with normalized `0..=1` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque purple.
    pub const PURPLE: Self = Self::rgba(0.5, 0.0, 0.5, 1.0);
    /// Opaque light gray.
    pub const LIGHT_GRAY: Self = Self::rgba(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0);
    /// Opaque orange.
    pub const ORANGE: Self = Self::rgba(1.0, 0.5, 0.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgba(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgba(1.0, 1.0, 0.0, 1.0);

    /// Build from normalized straight-alpha channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Quantize to premultiplied RGBA8, clamping channels into range.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            if x.is_nan() {
                return 0;
            }
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = if self.a.is_nan() {
            0.0
        } else {
            self.a.clamp(0.0, 1.0)
        };

        Rgba8Premul {
            r: to_u8(self.r.clamp(0.0, 1.0) * a),
            g: to_u8(self.g.clamp(0.0, 1.0) * a),
            b: to_u8(self.b.clamp(0.0, 1.0) * a),
            a: to_u8(a),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/color.rs"]
mod tests;
