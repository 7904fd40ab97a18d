//! Per-burst orchestration and the host-facing overlay.

pub(crate) mod controller;
pub(crate) mod overlay;
