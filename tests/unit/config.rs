use super::*;

#[test]
fn default_matches_stock_constants() {
    let cfg = OverlayConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.cell.birth_rate, 50.0);
    assert_eq!(cfg.cell.lifetime, 10.0);
    assert_eq!(cfg.sprite_size, 12.0);
    assert_eq!(cfg.fade_secs, 1.0);
    assert_eq!(cfg.text_size, 16.0);
    assert_eq!(cfg.font_family, "sans-serif");
    assert_eq!(cfg.seed, 0x5EED);
}

#[test]
fn empty_object_is_default() {
    let cfg = OverlayConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, OverlayConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = OverlayConfig::from_json_str(
        r#"{ "cell": { "birth_rate": 20 }, "seed": 7, "font_family": "serif" }"#,
    )
    .unwrap();
    assert_eq!(cfg.cell.birth_rate, 20.0);
    assert_eq!(cfg.cell.lifetime, 10.0);
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.font_family, "serif");
    assert_eq!(cfg.sprite_size, 12.0);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = OverlayConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfettiError::Serde(_)));
    let err = OverlayConfig::from_json_str(r#"{ "sprite_size": "big" }"#).unwrap_err();
    assert!(matches!(err, ConfettiError::Serde(_)));
}

#[test]
fn out_of_range_values_are_validation_errors() {
    for json in [
        r#"{ "sprite_size": 0 }"#,
        r#"{ "fade_secs": -1 }"#,
        r#"{ "cell": { "lifetime": 0 } }"#,
        r#"{ "text_size": -16 }"#,
        r#"{ "font_family": "  " }"#,
    ] {
        let err = OverlayConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfettiError::Validation(_)), "{json}: {err}");
    }
}
