use super::*;
use crate::content::{color::Color, model::Content, model::ShapeKind};
use crate::foundation::core::{Point, SurfaceSize};

fn particle_at(x: f64, y: f64) -> Particle {
    Particle {
        cell: 0,
        position: Point::new(x, y),
        velocity: Vec2::ZERO,
        rotation: 0.0,
        spin: 0.0,
        scale: 1.0,
        age: 0.0,
        lifetime: 1.0,
    }
}

#[test]
fn particle_transform_centers_sprite() {
    let t = particle_transform(&particle_at(20.0, 30.0), 12.0, 12.0);
    assert_eq!(t * Point::new(6.0, 6.0), Point::new(20.0, 30.0));
    assert_eq!(t * Point::new(0.0, 0.0), Point::new(14.0, 24.0));

    let mut p = particle_at(0.0, 0.0);
    p.scale = 0.5;
    let t = particle_transform(&p, 12.0, 12.0);
    assert_eq!(t * Point::new(12.0, 12.0), Point::new(3.0, 3.0));
}

#[test]
fn empty_bounds_render_empty_frame() {
    let overlay = ConfettiOverlay::default();
    let frame = CpuOverlayRenderer::default().render(&overlay).unwrap();
    assert_eq!((frame.width, frame.height), (0, 0));
    assert!(frame.data.is_empty());
}

#[test]
fn oversized_bounds_are_render_errors() {
    let mut overlay = ConfettiOverlay::default();
    overlay.attach(SurfaceSize::new(70_000.0, 10.0));
    let err = CpuOverlayRenderer::default().render(&overlay).unwrap_err();
    assert!(matches!(err, ConfettiError::Render(_)));
}

#[test]
fn clear_color_fills_frame() {
    let mut overlay = ConfettiOverlay::default();
    overlay.attach(SurfaceSize::new(8.0, 4.0));
    let mut r = CpuOverlayRenderer::new(RenderSettings {
        clear_rgba: Some([0, 0, 255, 255]),
    });
    let frame = r.render(&overlay).unwrap();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(3, 2), Some([0, 0, 255, 255]));
}

#[test]
fn particles_draw_tinted_sprites() {
    let mut overlay = ConfettiOverlay::default();
    overlay.attach(SurfaceSize::new(200.0, 200.0));
    overlay.emit_default(&[Content::shape(ShapeKind::Square, Color::RED)]);
    overlay.tick(0.1);

    let mut r = CpuOverlayRenderer::default();
    let frame = r.render(&overlay).unwrap();
    assert!(frame.covered_pixels() > 0);
    for px in frame.data.chunks_exact(4) {
        // Red tint: no green or blue ever reaches the frame.
        assert_eq!(px[1], 0);
        assert_eq!(px[2], 0);
    }
    assert_eq!(r.cached_paints(), 1);
}

#[test]
fn paint_cache_is_pruned_with_bursts() {
    let mut overlay = ConfettiOverlay::default();
    overlay.attach(SurfaceSize::new(32.0, 32.0));
    let id = overlay.emit_default(&[
        Content::shape(ShapeKind::Circle, Color::GREEN),
        Content::shape(ShapeKind::Triangle, Color::BLUE),
    ]);
    overlay.tick(0.1);

    let mut r = CpuOverlayRenderer::default();
    r.render(&overlay).unwrap();
    assert_eq!(r.cached_paints(), 2);

    overlay.cancel(id);
    r.render(&overlay).unwrap();
    assert_eq!(r.cached_paints(), 0);
}
