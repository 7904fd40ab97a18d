//! Compositing overlays into RGBA frames.

pub(crate) mod backend;
pub(crate) mod cpu;
