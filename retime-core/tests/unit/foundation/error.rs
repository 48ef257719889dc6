use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RetimeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RetimeError::curve("x").to_string().contains("curve error:"));
    assert!(
        RetimeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RetimeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
