//! Shared primitives: errors, geometry/pixel types and deterministic math helpers.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
