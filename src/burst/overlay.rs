use crate::{
    burst::controller::{BurstController, BurstId, BurstStatus, Completion},
    config::OverlayConfig,
    foundation::error::ConfettiResult,
    content::{model::Content, raster::ContentRasterizer},
    emission::cell::{EmissionCell, build_cell},
    foundation::core::SurfaceSize,
    foundation::math::Rng64,
};

/// Ramp length used by [`ConfettiOverlay::emit_default`].
pub const DEFAULT_DURATION_SECS: f64 = 3.0;

/// Host-facing confetti layer over one drawing surface.
///
/// Every [`emit`](Self::emit) creates an independent burst layered above earlier ones. The host
/// drives time with [`tick`](Self::tick) from its frame clock and reports surface changes through
/// [`attach`](Self::attach), [`resize`](Self::resize) and [`detach`](Self::detach).
#[derive(Debug)]
pub struct ConfettiOverlay {
    config: OverlayConfig,
    rasterizer: ContentRasterizer,
    bursts: Vec<BurstController>,
    bounds: SurfaceSize,
    attached: bool,
    next_id: u64,
}

impl Default for ConfettiOverlay {
    fn default() -> Self {
        let config = OverlayConfig::default();
        let rasterizer = ContentRasterizer::new(config.sprite_size, config.font_family.clone());
        Self::from_parts(config, rasterizer)
    }
}

impl ConfettiOverlay {
    /// Create a detached overlay. Fails when `config` does not validate.
    pub fn new(config: OverlayConfig) -> ConfettiResult<Self> {
        config.validate()?;
        let rasterizer = ContentRasterizer::new(config.sprite_size, config.font_family.clone());
        Ok(Self::from_parts(config, rasterizer))
    }

    /// Create a detached overlay with a caller-supplied rasterizer (for example one sharing a
    /// preloaded font database).
    pub fn with_rasterizer(
        config: OverlayConfig,
        rasterizer: ContentRasterizer,
    ) -> ConfettiResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, rasterizer))
    }

    fn from_parts(config: OverlayConfig, rasterizer: ContentRasterizer) -> Self {
        Self {
            config,
            rasterizer,
            bursts: Vec::new(),
            bounds: SurfaceSize::ZERO,
            attached: false,
            next_id: 0,
        }
    }

    /// Overlay configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Text content at the configured glyph size.
    pub fn text(&self, text: impl Into<String>) -> Content {
        Content::text_sized(text, self.config.text_size)
    }

    /// Adopt the host surface bounds and lay out every emitter.
    pub fn attach(&mut self, size: SurfaceSize) {
        self.attached = true;
        self.bounds = size;
        for b in &mut self.bursts {
            b.emitter_mut().attach(size);
        }
        tracing::debug!(width = size.width, height = size.height, "overlay attached");
    }

    /// Re-layout every emitter for new host bounds.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.bounds = size;
        for b in &mut self.bursts {
            b.emitter_mut().layout(size);
        }
    }

    /// Cancel every burst without completion. Idempotent.
    pub fn detach(&mut self) {
        if !self.attached && self.bursts.is_empty() {
            return;
        }
        for b in &mut self.bursts {
            b.cancel();
            b.emitter_mut().detach();
        }
        let cancelled = self.bursts.len();
        self.bursts.clear();
        self.attached = false;
        tracing::debug!(cancelled, "overlay detached");
    }

    /// Start a burst of `contents` ramping over `duration` seconds.
    ///
    /// Content that cannot be drawn emits an empty sprite; the burst itself always starts.
    /// Non-finite durations emit until stopped and never invoke `completion`.
    #[tracing::instrument(
        level = "debug",
        skip(self, contents, completion),
        fields(cells = contents.len())
    )]
    pub fn emit(
        &mut self,
        contents: &[Content],
        duration: f64,
        completion: Option<Completion>,
    ) -> BurstId {
        let id = BurstId(self.next_id);
        self.next_id += 1;

        let cells: Vec<EmissionCell> = contents
            .iter()
            .map(|c| build_cell(self.rasterizer.rasterize(c), &self.config.cell))
            .collect();

        let rng = Rng64::derive(self.config.seed, id.0);
        let mut burst = BurstController::new(
            id,
            cells,
            duration,
            self.config.fade_secs,
            rng,
            completion,
        );
        if self.attached {
            burst.emitter_mut().attach(self.bounds);
        }
        self.bursts.push(burst);
        id
    }

    /// [`emit`](Self::emit) over [`DEFAULT_DURATION_SECS`] without completion.
    pub fn emit_default(&mut self, contents: &[Content]) -> BurstId {
        self.emit(contents, DEFAULT_DURATION_SECS, None)
    }

    /// Advance every burst by `dt` seconds in creation order and drop the ones that ended.
    pub fn tick(&mut self, dt: f64) {
        self.bursts.retain_mut(|b| b.tick(dt) == BurstStatus::Active);
    }

    /// Interrupt one burst: finite bursts complete with `false`, infinite ones are just removed.
    /// Returns `false` when no such burst is live.
    pub fn stop(&mut self, id: BurstId) -> bool {
        self.remove_with(id, BurstController::interrupt)
    }

    /// Remove one burst without completion. Returns `false` when no such burst is live.
    pub fn cancel(&mut self, id: BurstId) -> bool {
        self.remove_with(id, BurstController::cancel)
    }

    fn remove_with(&mut self, id: BurstId, end: fn(&mut BurstController)) -> bool {
        let Some(idx) = self.bursts.iter().position(|b| b.id() == id) else {
            return false;
        };
        let mut burst = self.bursts.remove(idx);
        end(&mut burst);
        true
    }

    /// Live bursts, bottom to top.
    pub fn bursts(&self) -> &[BurstController] {
        &self.bursts
    }

    /// Look up a live burst.
    pub fn burst(&self, id: BurstId) -> Option<&BurstController> {
        self.bursts.iter().find(|b| b.id() == id)
    }

    /// Whether the overlay is attached to a host surface.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Current host surface bounds.
    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/burst/overlay.rs"]
mod tests;
