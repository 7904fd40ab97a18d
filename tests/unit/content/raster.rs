use super::*;

fn alpha_at(b: &Bitmap, x: u32, y: u32) -> u8 {
    b.pixel(x, y).map(|p| p.a).unwrap_or(0)
}

#[test]
fn shape_bitmaps_are_tint_independent() {
    let r = ContentRasterizer::default();
    let purple = r.rasterize(&Content::shape(ShapeKind::Circle, Color::PURPLE));
    let orange = r.rasterize(&Content::shape(ShapeKind::Circle, Color::ORANGE));

    assert_eq!(purple.bitmap, orange.bitmap);
    assert_eq!(purple.tint, Some(Color::PURPLE));
    assert_eq!(orange.tint, Some(Color::ORANGE));
}

#[test]
fn shapes_fill_a_white_twelve_unit_square() {
    let r = ContentRasterizer::default();
    for kind in [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Square] {
        let s = r.rasterize(&Content::shape(kind.clone(), Color::RED));
        assert_eq!((s.bitmap.width(), s.bitmap.height()), (12, 12), "{kind:?}");
        let center = s.bitmap.pixel(6, 6).unwrap();
        assert_eq!(center, crate::foundation::core::Rgba8Premul::white(), "{kind:?}");
    }
}

#[test]
fn outlines_differ_at_the_corners() {
    let r = ContentRasterizer::default();
    let square = r.rasterize(&Content::shape(ShapeKind::Square, Color::RED)).bitmap;
    let circle = r.rasterize(&Content::shape(ShapeKind::Circle, Color::RED)).bitmap;
    let triangle = r.rasterize(&Content::shape(ShapeKind::Triangle, Color::RED)).bitmap;

    assert_eq!(alpha_at(&square, 0, 0), 255);
    assert_eq!(alpha_at(&circle, 0, 0), 0);
    // Triangle apex is at the top middle; the top corners stay clear, the bottom corners fill.
    assert_eq!(alpha_at(&triangle, 0, 0), 0);
    assert_eq!(alpha_at(&triangle, 11, 0), 0);
    assert!(alpha_at(&triangle, 6, 10) > 200);
}

#[test]
fn custom_outline_is_drawn_in_sprite_space() {
    let r = ContentRasterizer::default();
    let s = r.rasterize(&Content::shape(
        ShapeKind::custom_svg("M0,0 L6,0 L6,12 L0,12 Z"),
        Color::BLUE,
    ));
    assert_eq!(alpha_at(&s.bitmap, 2, 6), 255);
    assert_eq!(alpha_at(&s.bitmap, 9, 6), 0);
    assert_eq!(s.tint, Some(Color::BLUE));
}

#[test]
fn degenerate_custom_outlines_fall_back_to_empty_sprites() {
    let r = ContentRasterizer::default();

    let bad_data = r.rasterize(&Content::shape(ShapeKind::custom_svg("M0,0 Q"), Color::RED));
    assert!(bad_data.bitmap.is_empty());

    let line = r.rasterize(&Content::shape(ShapeKind::custom_svg("M0,0 L12,0"), Color::RED));
    assert!(line.bitmap.is_empty());

    let mut nan = BezPath::new();
    nan.move_to((0.0, 0.0));
    nan.line_to((f64::NAN, 4.0));
    nan.line_to((4.0, 4.0));
    nan.close_path();
    let s = r.rasterize(&Content::shape(ShapeKind::Custom(nan), Color::RED));
    assert!(s.bitmap.is_empty());
    assert_eq!(s.tint, Some(Color::RED));
}

#[test]
fn images_pass_through_with_optional_tint() {
    let r = ContentRasterizer::default();
    let bmp = Bitmap::from_premul_rgba8(1, 2, vec![10, 20, 30, 255, 0, 0, 0, 0]).unwrap();

    let tinted = r.rasterize(&Content::image(bmp.clone(), Some(Color::ORANGE)));
    assert!(tinted.bitmap.shares_pixels(&bmp));
    assert_eq!(tinted.tint, Some(Color::ORANGE));

    let plain = r.rasterize(&Content::image(bmp.clone(), None));
    assert_eq!(plain.tint, None);
}

#[test]
fn text_is_never_tinted_and_bad_sizes_degrade() {
    let r = ContentRasterizer::with_fontdb(
        DEFAULT_SPRITE_SIZE,
        "sans-serif",
        Arc::new(usvg::fontdb::Database::new()),
    );
    let s = r.rasterize(&Content::text("🎉"));
    assert_eq!(s.tint, None);

    let s = r.rasterize(&Content::text_sized("x", -4.0));
    assert!(s.bitmap.is_empty());
    assert_eq!(s.tint, None);
}
