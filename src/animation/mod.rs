//! Easing curves and keyframed scalar curves used by the emission timeline.

pub(crate) mod ease;
pub(crate) mod keyframes;
