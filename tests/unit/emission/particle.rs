use super::*;
use crate::content::{bitmap::Bitmap, raster::Sprite};
use crate::emission::cell::{CellParams, build_cell};

fn cell() -> EmissionCell {
    build_cell(
        Sprite {
            bitmap: Bitmap::empty(),
            tint: None,
        },
        &CellParams::default(),
    )
}

#[test]
fn spawned_particles_sample_within_cell_ranges() {
    let cell = cell();
    let mut rng = Rng64::new(1);
    for _ in 0..500 {
        let p = Particle::spawn(3, &cell, Point::new(10.0, 0.0), &mut rng);
        assert_eq!(p.cell, 3);
        assert_eq!(p.age, 0.0);
        assert_eq!(p.lifetime, 10.0);

        let speed = p.velocity.hypot();
        assert!((250.0 - 1e-9..=750.0 + 1e-9).contains(&speed), "speed {speed}");
        assert!((0.5..=1.0).contains(&p.scale), "scale {}", p.scale);
        assert!(p.spin.abs() <= cell.spin_range);

        // Within 22.5 degrees of straight down.
        let off_axis = p.velocity.x.atan2(p.velocity.y).abs();
        assert!(off_axis <= std::f64::consts::PI / 8.0 + 1e-9, "angle {off_axis}");
        assert!(p.velocity.y > 0.0);
    }
}

#[test]
fn motion_is_ballistic_until_lifetime() {
    let mut p = Particle {
        cell: 0,
        position: Point::new(0.0, 0.0),
        velocity: Vec2::new(3.0, 4.0),
        rotation: 0.0,
        spin: 2.0,
        scale: 1.0,
        age: 0.0,
        lifetime: 1.0,
    };
    assert!(p.advance(0.5));
    assert_eq!(p.position, Point::new(1.5, 2.0));
    assert_eq!(p.rotation, 1.0);
    assert!(p.advance(0.25));
    assert_eq!(p.position, Point::new(2.25, 3.0));
    assert!(!p.advance(0.25));
}
