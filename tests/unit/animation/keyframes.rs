use super::*;

fn key(at: f64, value: f64, ease: Ease) -> Keyframe<f64> {
    Keyframe { at, value, ease }
}

#[test]
fn equal_values_hold_between_keys() {
    let kf = Keyframes::new(vec![
        key(0.0, 1.0, Ease::Linear),
        key(0.5, 1.0, Ease::SplineIn),
        key(1.0, 0.0, Ease::Linear),
    ])
    .unwrap();
    assert_eq!(kf.sample(0.25), 1.0);
    assert_eq!(kf.sample(0.5), 1.0);
    assert_eq!(kf.sample(1.0), 0.0);
}

#[test]
fn interpolation_uses_the_earlier_keys_ease() {
    let kf = Keyframes::new(vec![
        key(0.0, 0.0, Ease::Linear),
        key(1.0, 10.0, Ease::Linear),
    ])
    .unwrap();
    assert_eq!(kf.sample(0.5), 5.0);

    let eased = Keyframes::new(vec![
        key(0.0, 0.0, Ease::SplineIn),
        key(1.0, 10.0, Ease::Linear),
    ])
    .unwrap();
    let expected = 10.0 * Ease::SplineIn.apply(0.5);
    assert!((eased.sample(0.5) - expected).abs() < 1e-12);
    assert!(eased.sample(0.5) < 5.0);
}

#[test]
fn sampling_outside_span_holds_endpoints() {
    let kf = Keyframes::new(vec![
        key(0.2, 4.0, Ease::Linear),
        key(0.8, 8.0, Ease::Linear),
    ])
    .unwrap();
    assert_eq!(kf.sample(-1.0), 4.0);
    assert_eq!(kf.sample(0.0), 4.0);
    assert_eq!(kf.sample(1.0), 8.0);
    assert_eq!(kf.sample(f64::NAN), 4.0);
}

#[test]
fn validation_rejects_bad_keys() {
    assert!(Keyframes::<f64>::new(vec![]).is_err());
    assert!(
        Keyframes::new(vec![
            key(0.6, 0.0, Ease::Linear),
            key(0.4, 1.0, Ease::Linear),
        ])
        .is_err()
    );
    assert!(Keyframes::new(vec![key(1.5, 0.0, Ease::Linear)]).is_err());
    assert!(Keyframes::new(vec![key(f64::NAN, 0.0, Ease::Linear)]).is_err());
}
