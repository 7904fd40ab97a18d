use std::sync::Arc;

use anyhow::Context;

use crate::{
    content::color::Color,
    foundation::core::Rgba8Premul,
    foundation::error::{ConfettiError, ConfettiResult},
};

#[derive(Clone, Debug, PartialEq)]
/// Immutable raster sprite in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so cloning a bitmap into several emission cells is cheap.
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Zero-area bitmap used when content cannot be rendered.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            rgba8_premul: Arc::new(Vec::new()),
        }
    }

    /// Wrap premultiplied RGBA8 bytes, validating the byte length.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> ConfettiResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(ConfettiError::validation(format!(
                "bitmap byte length {} does not match {width}x{height} RGBA8",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(
        width: u32,
        height: u32,
        mut bytes: Vec<u8>,
    ) -> ConfettiResult<Self> {
        premultiply_rgba8_in_place(&mut bytes);
        Self::from_premul_rgba8(width, height, bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major premultiplied RGBA8 pixels.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Return `true` for zero-area bitmaps.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Return `true` when both bitmaps share pixel storage.
    pub fn shares_pixels(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }

    /// Multiply every pixel by `tint`, the way emission cells color their contents.
    pub fn tinted(&self, tint: Color) -> Self {
        let tint = tint.to_rgba8_premul();
        if tint == Rgba8Premul::white() {
            return self.clone();
        }

        let mut out = Vec::with_capacity(self.rgba8_premul.len());
        for px in self.rgba8_premul.chunks_exact(4) {
            let p = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
            .modulate(tint);
            out.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        Self {
            width: self.width,
            height: self.height,
            rgba8_premul: Arc::new(out),
        }
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) held in memory into a premultiplied bitmap.
pub fn decode_bitmap(bytes: &[u8]) -> ConfettiResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::from_straight_rgba8(width, height, rgba.into_raw())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/bitmap.rs"]
mod tests;
