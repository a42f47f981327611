use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(64, 32).unwrap();
    assert_eq!(c.to_string(), "64x32");
}

#[test]
fn canvas_deserialization_enforces_non_zero_size() {
    let c: Canvas = serde_json::from_str(r#"{"width":8,"height":6}"#).unwrap();
    assert_eq!(c, Canvas::new(8, 6).unwrap());
    assert!(serde_json::from_str::<Canvas>(r#"{"width":0,"height":6}"#).is_err());
    assert!(serde_json::from_str::<Canvas>(r#"{"width":8,"height":0}"#).is_err());
}

#[test]
fn canvas_center_is_half_size() {
    let c = Canvas::new(101, 50).unwrap();
    assert_eq!(c.center(), [50.5, 25.0, 0.0]);
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let observer = token.clone();
    assert!(observer.check().is_ok());

    token.cancel();
    assert!(observer.is_cancelled());
    assert!(matches!(
        observer.check(),
        Err(ConvertError::CancellationRequested)
    ));
}
