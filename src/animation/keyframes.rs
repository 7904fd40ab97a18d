use crate::{
    animation::ease::Ease,
    foundation::error::{ConfettiError, ConfettiResult},
};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One keyframe in a keyframed curve.
pub struct Keyframe<T> {
    /// Normalized time of this key in `[0, 1]`.
    pub at: f64,
    /// Value at `at`.
    pub value: T,
    /// Easing function applied toward the next keyframe.
    pub ease: Ease,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Keyframed curve sampled over normalized time. Neighbouring keys are interpolated with the
/// earlier key's [`Ease`].
///
/// Timelines scale their elapsed time into `[0, 1]` before sampling, so the same curve serves
/// every burst duration.
pub struct Keyframes<T> {
    keys: Vec<Keyframe<T>>, // sorted by `at`
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Build a validated curve: at least one key, keys sorted, all times finite in `[0, 1]`.
    pub fn new(keys: Vec<Keyframe<T>>) -> ConfettiResult<Self> {
        if keys.is_empty() {
            return Err(ConfettiError::animation(
                "Keyframes must have at least one key",
            ));
        }
        if keys
            .iter()
            .any(|k| !k.at.is_finite() || !(0.0..=1.0).contains(&k.at))
        {
            return Err(ConfettiError::animation(
                "Keyframe times must be finite and within [0, 1]",
            ));
        }
        if !keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(ConfettiError::animation(
                "Keyframes keys must be sorted by time",
            ));
        }
        Ok(Self { keys })
    }

    /// Build from keys already known to satisfy the invariants of [`Self::new`].
    pub(crate) fn from_sorted(keys: Vec<Keyframe<T>>) -> Self {
        debug_assert!(!keys.is_empty());
        debug_assert!(keys.windows(2).all(|w| w[0].at <= w[1].at));
        Self { keys }
    }

    /// Keys in time order.
    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    /// Sample at normalized time `t`; values outside the key span hold the nearest key.
    pub fn sample(&self, t: f64) -> T {
        let t = if t.is_nan() { 0.0 } else { t };
        let idx = self.keys.partition_point(|k| k.at <= t);

        if idx == 0 {
            return self.keys[0].value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return a.value.clone();
        }

        T::lerp(&a.value, &b.value, a.ease.apply((t - a.at) / span))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
