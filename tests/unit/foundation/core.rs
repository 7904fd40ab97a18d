use super::*;

#[test]
fn surface_size_sanitizes_bad_extents() {
    let s = SurfaceSize::new(f64::NAN, -3.0);
    assert_eq!(s, SurfaceSize::ZERO);
    assert!(s.is_empty());

    let s = SurfaceSize::new(320.0, f64::INFINITY);
    assert_eq!(s.width, 320.0);
    assert_eq!(s.height, 0.0);
}

#[test]
fn surface_canvas_px_rounds_up_and_rejects_oversize() {
    assert_eq!(
        SurfaceSize::new(10.2, 4.0).to_canvas_px().unwrap(),
        (11, 4)
    );
    assert!(SurfaceSize::new(70_000.0, 1.0).to_canvas_px().is_err());
}

#[test]
fn fps_frame_duration() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frame_duration_secs() - 1.0 / 60.0).abs() < 1e-12);
    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert!((ntsc.frame_duration_secs() - 1001.0 / 30_000.0).abs() < 1e-12);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn modulate_by_white_is_identity_and_by_transparent_clears() {
    let px = Rgba8Premul {
        r: 100,
        g: 50,
        b: 25,
        a: 128,
    };
    let clear = Rgba8Premul {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    assert_eq!(px.modulate(Rgba8Premul::white()), px);
    assert_eq!(px.modulate(clear), clear);
}
