use smallvec::SmallVec;

use crate::{
    animation::{
        ease::Ease,
        keyframes::{Keyframe, Keyframes},
    },
    foundation::error::{ConfettiError, ConfettiResult},
};

/// Seconds the whole-emitter fade lasts once the ramp ends.
pub const FADE_SECS: f64 = 1.0;

/// Lifecycle phase of an [`EmissionTimeline`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelinePhase {
    /// Not started.
    Idle,
    /// Driving the birth rate; infinite ramps never leave this phase on their own.
    Ramping,
    /// Emission stopped; the emitter opacity eases to zero.
    FadingOut,
    /// Terminal. `finished` is `false` when the timeline was cancelled.
    Done {
        /// Whether the fade ran to its natural end.
        finished: bool,
    },
}

/// Control values for the emitter at the current time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineSample {
    /// Birth-rate control in `[0, 1]`.
    pub birth_rate: f64,
    /// Whole-emitter opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Phase transitions crossed during one [`EmissionTimeline::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineEvent {
    /// The ramp reached its end and the fade began.
    RampFinished,
    /// The fade completed.
    FadeFinished,
}

/// Result of advancing a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    /// Control values after the advance.
    pub sample: TimelineSample,
    /// Transitions crossed, in order.
    pub events: SmallVec<[TimelineEvent; 2]>,
}

/// Drives a burst's birth rate and opacity over time.
///
/// `Idle → Ramping(duration) → FadingOut(fade) → Done`. The ramp holds full rate for the first
/// half of the duration, then eases in to zero across the second half.
#[derive(Clone, Debug)]
pub struct EmissionTimeline {
    phase: TimelinePhase,
    curve: Keyframes<f64>,
    // `None` ramps forever.
    duration: Option<f64>,
    fade_secs: f64,
    elapsed: f64,
}

impl Default for EmissionTimeline {
    fn default() -> Self {
        Self::new(FADE_SECS)
    }
}

impl EmissionTimeline {
    /// Create an idle timeline with a fade of `fade_secs` (non-finite or negative values become 0).
    pub fn new(fade_secs: f64) -> Self {
        Self {
            phase: TimelinePhase::Idle,
            curve: ramp_curve(),
            duration: None,
            fade_secs: if fade_secs.is_finite() {
                fade_secs.max(0.0)
            } else {
                0.0
            },
            elapsed: 0.0,
        }
    }

    /// Create a timeline already ramping over `duration`; see [`Self::start`].
    pub fn started(duration: f64, fade_secs: f64) -> Self {
        let mut out = Self::new(fade_secs);
        out.begin(duration);
        out
    }

    /// Begin ramping over `duration` seconds.
    ///
    /// Infinite or NaN durations ramp forever at full rate. Negative durations are clamped to 0.
    pub fn start(&mut self, duration: f64) -> ConfettiResult<()> {
        if self.phase != TimelinePhase::Idle {
            return Err(ConfettiError::validation("timeline already started"));
        }
        self.begin(duration);
        Ok(())
    }

    fn begin(&mut self, duration: f64) {
        self.duration = duration.is_finite().then(|| duration.max(0.0));
        self.elapsed = 0.0;
        self.phase = TimelinePhase::Ramping;
        tracing::debug!(duration = ?self.duration, "timeline ramping");
    }

    /// Current phase.
    pub fn phase(&self) -> TimelinePhase {
        self.phase
    }

    /// Seconds spent in the current phase.
    pub fn elapsed_in_phase(&self) -> f64 {
        self.elapsed
    }

    /// Ramp duration, or `None` for an infinite ramp.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Advance by `dt` seconds. Time left over at the end of a phase carries into the next.
    pub fn advance(&mut self, dt: f64) -> TimelineStep {
        let mut events = SmallVec::new();
        let mut left = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.phase == TimelinePhase::Ramping {
            match self.duration {
                None => self.elapsed += left,
                Some(d) => {
                    if self.elapsed + left >= d {
                        left -= (d - self.elapsed).max(0.0);
                        self.elapsed = 0.0;
                        self.phase = TimelinePhase::FadingOut;
                        events.push(TimelineEvent::RampFinished);
                        tracing::debug!(duration = d, "ramp finished; fading out");
                    } else {
                        self.elapsed += left;
                    }
                }
            }
        }

        if self.phase == TimelinePhase::FadingOut {
            if self.elapsed + left >= self.fade_secs {
                self.elapsed = 0.0;
                self.phase = TimelinePhase::Done { finished: true };
                events.push(TimelineEvent::FadeFinished);
                tracing::debug!("fade finished");
            } else {
                self.elapsed += left;
            }
        }

        TimelineStep {
            sample: self.sample(),
            events,
        }
    }

    /// Control values at the current time.
    pub fn sample(&self) -> TimelineSample {
        match self.phase {
            TimelinePhase::Idle => TimelineSample {
                birth_rate: 1.0,
                opacity: 1.0,
            },
            TimelinePhase::Ramping => {
                let birth_rate = match self.duration {
                    None => 1.0,
                    Some(d) if d <= 0.0 => 0.0,
                    Some(d) => self.curve.sample(self.elapsed / d),
                };
                TimelineSample {
                    birth_rate,
                    opacity: 1.0,
                }
            }
            TimelinePhase::FadingOut => {
                let progress = if self.fade_secs > 0.0 {
                    self.elapsed / self.fade_secs
                } else {
                    1.0
                };
                TimelineSample {
                    birth_rate: 0.0,
                    opacity: 1.0 - Ease::SplineOut.apply(progress),
                }
            }
            TimelinePhase::Done { .. } => TimelineSample {
                birth_rate: 0.0,
                opacity: 0.0,
            },
        }
    }

    /// Move to `Done { finished: false }` unless already done. Returns whether anything changed.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, TimelinePhase::Done { .. }) {
            return false;
        }
        tracing::debug!(phase = ?self.phase, "timeline cancelled");
        self.phase = TimelinePhase::Done { finished: false };
        self.elapsed = 0.0;
        true
    }
}

fn ramp_curve() -> Keyframes<f64> {
    let key = |at, value, ease| Keyframe { at, value, ease };
    Keyframes::from_sorted(vec![
        key(0.0, 1.0, Ease::Linear),
        key(0.5, 1.0, Ease::SplineIn),
        key(1.0, 0.0, Ease::Linear),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/state.rs"]
mod tests;
