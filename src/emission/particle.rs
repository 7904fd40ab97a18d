use crate::{
    emission::cell::EmissionCell,
    foundation::core::{Point, Vec2},
    foundation::math::Rng64,
};

/// One live particle.
///
/// Motion is ballistic: constant velocity along the sampled direction, constant spin, no gravity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Index of the emitting cell in the emitter's cell list.
    pub cell: usize,
    /// Center position in surface coordinates.
    pub position: Point,
    /// Velocity in units per second.
    pub velocity: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Angular velocity in radians per second.
    pub spin: f64,
    /// Uniform draw scale.
    pub scale: f64,
    /// Seconds since birth.
    pub age: f64,
    /// Seconds until the particle is discarded.
    pub lifetime: f64,
}

impl Particle {
    /// Sample a new particle for `cell` born at `origin`.
    pub(crate) fn spawn(
        cell_index: usize,
        cell: &EmissionCell,
        origin: Point,
        rng: &mut Rng64,
    ) -> Self {
        let angle = cell.emission_longitude + cell.emission_range * (rng.next_f64_01() - 0.5);
        let speed = rng.spread(cell.velocity, cell.velocity_range).max(0.0);
        // Longitude is measured clockwise from "up" in a y-down surface.
        let dir = Vec2::new(angle.sin(), -angle.cos());

        Self {
            cell: cell_index,
            position: origin,
            velocity: dir * speed,
            rotation: 0.0,
            spin: rng.spread(cell.spin, cell.spin_range),
            scale: rng.spread(cell.scale, cell.scale_range).max(0.0),
            age: 0.0,
            lifetime: cell.lifetime,
        }
    }

    /// Advance by `dt` seconds. Returns `false` once the lifetime has elapsed.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.age += dt;
        if self.age >= self.lifetime {
            return false;
        }
        self.position += self.velocity * dt;
        self.rotation += self.spin * dt;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emission/particle.rs"]
mod tests;
