use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::peniko::color::PremulRgba8;

use crate::{
    burst::{controller::BurstId, overlay::ConfettiOverlay},
    content::bitmap::Bitmap,
    emission::{emitter::ParticleEmitter, particle::Particle},
    foundation::core::{Affine, BezPath, Vec2},
    foundation::error::{ConfettiError, ConfettiResult},
    render::backend::{FrameRGBA, RenderSettings},
};

#[derive(Clone)]
struct SpritePaint {
    paint: vello_cpu::Image,
    w: f64,
    h: f64,
}

/// Composites every burst of a [`ConfettiOverlay`] into a frame with `vello_cpu`.
///
/// Bursts are drawn bottom to top in creation order. Sprite paints are cached per burst and cell
/// and dropped once their burst leaves the overlay.
pub struct CpuOverlayRenderer {
    settings: RenderSettings,
    paint_cache: HashMap<(BurstId, usize), Option<SpritePaint>>,
}

impl std::fmt::Debug for CpuOverlayRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuOverlayRenderer")
            .field("settings", &self.settings)
            .field("cached_paints", &self.paint_cache.len())
            .finish()
    }
}

impl Default for CpuOverlayRenderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl CpuOverlayRenderer {
    /// Create a renderer.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            paint_cache: HashMap::new(),
        }
    }

    /// Number of cached sprite paints.
    pub fn cached_paints(&self) -> usize {
        self.paint_cache.len()
    }

    /// Render the overlay at its current bounds.
    #[tracing::instrument(
        level = "debug",
        skip(self, overlay),
        fields(bursts = overlay.bursts().len())
    )]
    pub fn render(&mut self, overlay: &ConfettiOverlay) -> ConfettiResult<FrameRGBA> {
        self.paint_cache.retain(|(id, _), _| overlay.burst(*id).is_some());

        let bounds = overlay.bounds();
        if bounds.is_empty() {
            return Ok(FrameRGBA::empty());
        }
        let (w, h) = bounds.to_canvas_px()?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        }
        for burst in overlay.bursts() {
            self.draw_emitter(burst.id(), burst.emitter(), &mut ctx)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_emitter(
        &mut self,
        id: BurstId,
        emitter: &ParticleEmitter,
        ctx: &mut vello_cpu::RenderContext,
    ) -> ConfettiResult<()> {
        let opacity = emitter.opacity() as f32;
        if opacity <= 0.0 || emitter.particles().is_empty() {
            return Ok(());
        }

        let mut paints = Vec::with_capacity(emitter.cell_paints().len());
        for (cell, bitmap) in emitter.cell_paints().iter().enumerate() {
            paints.push(self.paint_for(id, cell, bitmap)?);
        }

        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for particle in emitter.particles() {
            let Some(Some(p)) = paints.get(particle.cell) else {
                continue;
            };
            ctx.set_transform(affine_to_cpu(particle_transform(particle, p.w, p.h)));
            ctx.set_paint(p.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, p.w, p.h));
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn paint_for(
        &mut self,
        id: BurstId,
        cell: usize,
        bitmap: &Bitmap,
    ) -> ConfettiResult<Option<SpritePaint>> {
        if let Some(p) = self.paint_cache.get(&(id, cell)) {
            return Ok(p.clone());
        }
        let out = if bitmap.is_empty() {
            None
        } else {
            let pixmap =
                pixmap_from_premul_bytes(bitmap.rgba8_premul(), bitmap.width(), bitmap.height())?;
            Some(SpritePaint {
                paint: vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                },
                w: f64::from(bitmap.width()),
                h: f64::from(bitmap.height()),
            })
        };
        self.paint_cache.insert((id, cell), out.clone());
        Ok(out)
    }
}

/// Sprite-space to surface-space transform: centered on the particle, then scaled and rotated.
fn particle_transform(p: &Particle, w: f64, h: f64) -> Affine {
    Affine::translate(p.position.to_vec2())
        * Affine::rotate(p.rotation)
        * Affine::scale(p.scale)
        * Affine::translate(Vec2::new(-w / 2.0, -h / 2.0))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ConfettiResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ConfettiError::render("sprite width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ConfettiError::render("sprite height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ConfettiError::render("sprite byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
