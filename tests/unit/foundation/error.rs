use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ConfettiError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ConfettiError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ConfettiError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ConfettiError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ConfettiError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
