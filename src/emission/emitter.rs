use crate::{
    content::bitmap::Bitmap,
    emission::{cell::EmissionCell, particle::Particle},
    foundation::core::{Point, Size, SurfaceSize},
    foundation::error::{ConfettiError, ConfettiResult},
    foundation::math::Rng64,
};

/// Height of the emission line in surface units.
const LINE_HEIGHT: f64 = 1.0;

/// Upper bound on particles one cell may spawn in a single step.
const MAX_SPAWN_PER_STEP: usize = 4096;

/// Emission line placement: centered at the top edge, spanning the surface width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterGeometry {
    /// Center of the emission line.
    pub position: Point,
    /// Extent of the emission line.
    pub size: Size,
}

impl EmitterGeometry {
    /// Geometry for a surface of `size`.
    pub fn for_surface(size: SurfaceSize) -> Self {
        Self {
            position: Point::new(size.width / 2.0, 0.0),
            size: Size::new(size.width, LINE_HEIGHT),
        }
    }
}

/// Owns a burst's emission cells and the particles they produce.
#[derive(Debug)]
pub struct ParticleEmitter {
    cells: Vec<EmissionCell>,
    paints: Vec<Bitmap>,
    accumulators: Vec<f64>,
    particles: Vec<Particle>,
    geometry: EmitterGeometry,
    birth_rate: f64,
    opacity: f64,
    attached: bool,
    rng: Rng64,
}

impl ParticleEmitter {
    /// Create an empty, detached emitter drawing randomness from `rng`.
    pub fn new(rng: Rng64) -> Self {
        Self {
            cells: Vec::new(),
            paints: Vec::new(),
            accumulators: Vec::new(),
            particles: Vec::new(),
            geometry: EmitterGeometry::for_surface(SurfaceSize::ZERO),
            birth_rate: 1.0,
            opacity: 1.0,
            attached: false,
            rng,
        }
    }

    /// Create a detached emitter already configured with `cells`.
    pub fn with_cells(rng: Rng64, cells: Vec<EmissionCell>) -> Self {
        let mut out = Self::new(rng);
        out.set_cells(cells);
        out
    }

    /// Replace the cell set. Only allowed before the emitter is attached.
    pub fn configure(&mut self, cells: Vec<EmissionCell>) -> ConfettiResult<()> {
        if self.attached {
            return Err(ConfettiError::validation(
                "emitter cells cannot be replaced while attached",
            ));
        }
        self.set_cells(cells);
        Ok(())
    }

    fn set_cells(&mut self, cells: Vec<EmissionCell>) {
        self.paints = cells
            .iter()
            .map(|c| match c.tint {
                Some(tint) => c.sprite.tinted(tint),
                None => c.sprite.clone(),
            })
            .collect();
        self.accumulators = vec![0.0; cells.len()];
        self.particles.clear();
        self.cells = cells;
    }

    /// Attach to a surface of `size`. Idempotent.
    pub fn attach(&mut self, size: SurfaceSize) {
        self.attached = true;
        self.layout(size);
    }

    /// Stop emission and drop live particles. Idempotent.
    pub fn detach(&mut self) {
        self.stop();
        self.attached = false;
    }

    /// Recompute the emission line for a surface of `size`.
    pub fn layout(&mut self, size: SurfaceSize) {
        self.geometry = EmitterGeometry::for_surface(size);
    }

    /// Set the birth-rate control value, clamped to `[0, 1]`.
    pub fn set_birth_rate(&mut self, rate: f64) {
        self.birth_rate = if rate.is_finite() {
            rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Set the whole-emitter opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Zero the birth rate and drop every live particle.
    pub fn stop(&mut self) {
        self.birth_rate = 0.0;
        self.particles.clear();
        self.accumulators.iter_mut().for_each(|a| *a = 0.0);
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.particles.retain_mut(|p| p.advance(dt));

        if self.birth_rate <= 0.0 {
            return;
        }
        for (idx, cell) in self.cells.iter().enumerate() {
            let acc = &mut self.accumulators[idx];
            *acc += cell.birth_rate * self.birth_rate * dt;
            if !acc.is_finite() {
                *acc = 0.0;
                continue;
            }
            let whole = acc.floor();
            *acc -= whole;
            let count = (whole as usize).min(MAX_SPAWN_PER_STEP);

            for _ in 0..count {
                let origin = Point::new(
                    self.geometry.position.x
                        + (self.rng.next_f64_01() - 0.5) * self.geometry.size.width,
                    self.geometry.position.y + self.rng.next_f64_01() * self.geometry.size.height,
                );
                let mut particle = Particle::spawn(idx, cell, origin, &mut self.rng);
                // Born somewhere inside this step; catch up the time it already lived.
                let lived = self.rng.next_f64_01() * dt;
                if particle.advance(lived) {
                    self.particles.push(particle);
                }
            }
        }
    }

    /// Configured cells in input order.
    pub fn cells(&self) -> &[EmissionCell] {
        &self.cells
    }

    /// Per-cell sprite with its tint applied, parallel to [`Self::cells`].
    pub fn cell_paints(&self) -> &[Bitmap] {
        &self.paints
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current emission line.
    pub fn geometry(&self) -> EmitterGeometry {
        self.geometry
    }

    /// Current birth-rate control value.
    pub fn birth_rate(&self) -> f64 {
        self.birth_rate
    }

    /// Current whole-emitter opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether the emitter is attached to a surface.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emission/emitter.rs"]
mod tests;
