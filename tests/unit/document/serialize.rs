use super::*;
use crate::{document::builder::DocumentBuilder, foundation::core::Canvas};

fn doc(name: &str, frames: usize) -> AnimationDocument {
    let mut b = DocumentBuilder::new(30.0, Canvas::new(4, 2).unwrap(), name);
    for i in 0..frames {
        b.append(i, "data:image/png;base64,AA==", 4, 2).unwrap();
    }
    b.finalize().unwrap()
}

#[test]
fn output_uses_lottie_field_names() {
    let bytes = to_vec(&doc("Converted Animation", 2)).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    for key in ["v", "fr", "ip", "op", "w", "h", "nm", "ddd", "assets", "layers", "markers"] {
        assert!(v.get(key).is_some(), "missing root key {key}");
    }
    assert_eq!(v["v"], "5.7.4");
    assert_eq!(v["op"], 2.0);
    assert_eq!(v["markers"], serde_json::json!([]));

    let asset = &v["assets"][1];
    assert_eq!(asset["id"], "img_1");
    assert_eq!(asset["u"], "");
    assert_eq!(asset["e"], 1);
    assert_eq!(asset["p"], "data:image/png;base64,AA==");

    let layer = &v["layers"][1];
    for key in [
        "ddd", "ind", "ty", "nm", "refId", "sr", "ks", "ao", "ip", "op", "st", "bm",
    ] {
        assert!(layer.get(key).is_some(), "missing layer key {key}");
    }
    assert_eq!(layer["ty"], 2);
    assert_eq!(layer["ind"], 2);
    assert_eq!(layer["refId"], "img_1");
    assert_eq!(layer["ks"]["o"], serde_json::json!({"a": 0, "k": 100.0}));
    assert_eq!(layer["ks"]["p"]["k"], serde_json::json!([2.0, 1.0, 0.0]));
    assert_eq!(layer["ks"]["s"]["k"], serde_json::json!([100.0, 100.0, 100.0]));
}

#[test]
fn output_is_compact_and_omits_absent_fields() {
    let bytes = to_vec(&doc("", 1)).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(!text.contains('\n'));
    assert!(!text.contains(": "));
    assert!(!text.contains("null"));

    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(v.get("nm").is_none());
}

#[test]
fn invalid_document_is_a_serialization_failure() {
    let mut d = doc("x", 2);
    d.out_point = 5.0;
    assert!(matches!(
        to_vec(&d),
        Err(ConvertError::SerializationFailure(_))
    ));
}

#[test]
fn read_back_matches_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("animation.json");
    let d = doc("Round", 3);

    write_file(&d, &path, true).unwrap();
    let back = read_file(&path).unwrap();
    assert_eq!(back, d);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(from_slice(&bytes).unwrap(), d);
}

#[test]
fn write_refuses_overwrite_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("animation.json");
    let d = doc("x", 1);

    write_file(&d, &path, false).unwrap();
    assert!(matches!(
        write_file(&d, &path, false),
        Err(ConvertError::Io(_))
    ));
    write_file(&d, &path, true).unwrap();
}
