use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ConvertError::EmptyInput
            .to_string()
            .contains("empty input:")
    );
    assert!(
        ConvertError::decode_failure(3, "x")
            .to_string()
            .contains("decode failure at frame 3:")
    );
    assert!(
        ConvertError::encode_failure(1, "x")
            .to_string()
            .contains("encode failure at frame 1:")
    );
    assert!(
        ConvertError::invalid_config("x")
            .to_string()
            .contains("invalid config:")
    );
    assert!(
        ConvertError::serialization("x")
            .to_string()
            .contains("serialization failure:")
    );
    assert!(
        ConvertError::media("x")
            .to_string()
            .contains("media tool error:")
    );
}

#[test]
fn frame_position_only_for_frame_errors() {
    assert_eq!(ConvertError::decode_failure(7, "bad").frame_position(), Some(7));
    assert_eq!(ConvertError::encode_failure(2, "bad").frame_position(), Some(2));
    assert_eq!(ConvertError::EmptyInput.frame_position(), None);
    assert!(ConvertError::CancellationRequested.is_cancelled());
    assert!(!ConvertError::EmptyInput.is_cancelled());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ConvertError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
