//! Confetti content descriptors and their rasterization into sprites.

pub(crate) mod bitmap;
pub(crate) mod color;
pub(crate) mod model;
pub(crate) mod raster;
pub(crate) mod text;
