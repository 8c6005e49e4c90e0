use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VizError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        VizError::limit_exceeded("x")
            .to_string()
            .contains("limit exceeded:")
    );
    assert!(
        VizError::operation("x")
            .to_string()
            .contains("operation error:")
    );
    assert!(
        VizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: VizError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, VizError::Serde(_)));
}
