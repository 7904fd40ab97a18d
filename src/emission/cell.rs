use std::f64::consts::PI;

use crate::content::{bitmap::Bitmap, color::Color, raster::Sprite};

/// Particles per second per cell at full birth rate.
pub const DEFAULT_BIRTH_RATE: f64 = 50.0;
/// Seconds each particle lives.
pub const DEFAULT_LIFETIME: f64 = 10.0;

/// Tunable inputs of [`build_cell`]; everything else about a cell is derived.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CellParams {
    /// Particles spawned per second at control value 1.0.
    pub birth_rate: f64,
    /// Seconds each particle lives.
    pub lifetime: f64,
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            birth_rate: DEFAULT_BIRTH_RATE,
            lifetime: DEFAULT_LIFETIME,
        }
    }
}

/// Parameter set controlling one sprite's particle generation.
///
/// Ranges are half-widths: a sampled value lies in `mean ± range`.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionCell {
    /// Sprite drawn for each particle (tint not yet applied).
    pub sprite: Bitmap,
    /// Particles per second at control value 1.0.
    pub birth_rate: f64,
    /// Particle lifetime in seconds.
    pub lifetime: f64,
    /// Mean speed in units per second.
    pub velocity: f64,
    /// Speed half-range.
    pub velocity_range: f64,
    /// Emission direction in radians, clockwise from "up" (π points down the surface).
    pub emission_longitude: f64,
    /// Angular spread in radians, centered on the longitude.
    pub emission_range: f64,
    /// Mean spin in radians per second.
    pub spin: f64,
    /// Spin half-range in radians per second.
    pub spin_range: f64,
    /// Mean scale.
    pub scale: f64,
    /// Scale half-range.
    pub scale_range: f64,
    /// Tint multiplied into the sprite when drawn.
    pub tint: Option<Color>,
}

/// Build the emission cell for a rasterized sprite.
///
/// Speed is tied to `birth_rate × lifetime` so the stream keeps the same visual density whatever
/// rate is configured.
pub fn build_cell(sprite: Sprite, params: &CellParams) -> EmissionCell {
    let velocity = params.birth_rate * params.lifetime;
    let scale_range = 0.25;
    EmissionCell {
        sprite: sprite.bitmap,
        birth_rate: params.birth_rate,
        lifetime: params.lifetime,
        velocity,
        velocity_range: velocity / 2.0,
        emission_longitude: PI,
        emission_range: PI / 4.0,
        spin: 0.0,
        spin_range: PI * 8.0,
        scale: 1.0 - scale_range,
        scale_range,
        tint: sprite.tint,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emission/cell.rs"]
mod tests;
