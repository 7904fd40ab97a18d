//! Emission cells, the particle emitter, and the particles it spawns.

pub(crate) mod cell;
pub(crate) mod emitter;
pub(crate) mod particle;
