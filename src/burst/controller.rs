use crate::{
    emission::{cell::EmissionCell, emitter::ParticleEmitter},
    foundation::math::Rng64,
    timeline::state::{EmissionTimeline, TimelineEvent},
};

/// Callback invoked once when a finite burst ends; the flag is `true` when the fade ran to its
/// natural end and `false` when the burst was interrupted.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Identifier of one burst within its overlay, increasing in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurstId(pub u64);

impl std::fmt::Display for BurstId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "burst#{}", self.0)
    }
}

/// Where a burst is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstStatus {
    /// Ramping or fading.
    Active,
    /// The fade completed and completion ran with `true`.
    Finished,
    /// Stopped early; completion ran with `false`.
    Interrupted,
    /// Removed without completion (detachment, explicit cancel, or stopping an infinite burst).
    Cancelled,
}

/// One burst: an emitter, the timeline driving it, and the caller's completion.
pub struct BurstController {
    id: BurstId,
    emitter: ParticleEmitter,
    timeline: EmissionTimeline,
    completion: Option<Completion>,
    status: BurstStatus,
}

impl std::fmt::Debug for BurstController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BurstController")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("phase", &self.timeline.phase())
            .field("cells", &self.emitter.cells().len())
            .field("particles", &self.emitter.particles().len())
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

impl BurstController {
    /// Configure an emitter with `cells` and start ramping over `duration`.
    pub fn new(
        id: BurstId,
        cells: Vec<EmissionCell>,
        duration: f64,
        fade_secs: f64,
        rng: Rng64,
        completion: Option<Completion>,
    ) -> Self {
        Self {
            id,
            emitter: ParticleEmitter::with_cells(rng, cells),
            timeline: EmissionTimeline::started(duration, fade_secs),
            completion,
            status: BurstStatus::Active,
        }
    }

    /// Advance the timeline, apply its sample to the emitter, then step the emitter.
    pub fn tick(&mut self, dt: f64) -> BurstStatus {
        if self.status != BurstStatus::Active {
            return self.status;
        }

        let step = self.timeline.advance(dt);
        self.emitter.set_birth_rate(step.sample.birth_rate);
        self.emitter.set_opacity(step.sample.opacity);
        self.emitter.step(dt);

        if step.events.contains(&TimelineEvent::FadeFinished) {
            self.emitter.stop();
            self.status = BurstStatus::Finished;
            tracing::debug!(burst = %self.id, "burst finished");
            if let Some(done) = self.completion.take() {
                done(true);
            }
        }
        self.status
    }

    /// Stop everything without invoking completion. Idempotent.
    pub fn cancel(&mut self) {
        if self.status != BurstStatus::Active {
            return;
        }
        self.emitter.stop();
        self.timeline.cancel();
        self.completion = None;
        self.status = BurstStatus::Cancelled;
        tracing::debug!(burst = %self.id, "burst cancelled");
    }

    /// Stop early and report completion with `false`.
    ///
    /// Infinite bursts never complete, so they are cancelled instead.
    pub fn interrupt(&mut self) {
        if self.status != BurstStatus::Active {
            return;
        }
        if self.timeline.duration().is_none() {
            self.cancel();
            return;
        }
        self.emitter.stop();
        self.timeline.cancel();
        self.status = BurstStatus::Interrupted;
        tracing::debug!(burst = %self.id, "burst interrupted");
        if let Some(done) = self.completion.take() {
            done(false);
        }
    }

    /// This burst's id.
    pub fn id(&self) -> BurstId {
        self.id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> BurstStatus {
        self.status
    }

    /// Whether the burst is still ramping or fading.
    pub fn is_active(&self) -> bool {
        self.status == BurstStatus::Active
    }

    /// The burst's emitter.
    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    pub(crate) fn emitter_mut(&mut self) -> &mut ParticleEmitter {
        &mut self.emitter
    }

    /// The burst's timeline.
    pub fn timeline(&self) -> &EmissionTimeline {
        &self.timeline
    }
}

#[cfg(test)]
#[path = "../../tests/unit/burst/controller.rs"]
mod tests;
