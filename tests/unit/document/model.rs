use super::*;
use crate::{document::builder::DocumentBuilder, foundation::core::Canvas};

fn three_frame_doc() -> AnimationDocument {
    let mut b = DocumentBuilder::new(24.0, Canvas::new(10, 8).unwrap(), "t");
    for i in 0..3 {
        b.append(i, "data:image/png;base64,AA==", 10, 8).unwrap();
    }
    b.finalize().unwrap()
}

#[test]
fn asset_ids_follow_position() {
    assert_eq!(asset_id(0), "img_0");
    assert_eq!(asset_id(17), "img_17");
}

#[test]
fn property_fixed_is_not_animated() {
    let p = Property::fixed([1.0, 2.0, 3.0]);
    assert_eq!(p.animated, 0);
    assert_eq!(p.value, [1.0, 2.0, 3.0]);
}

#[test]
fn built_document_validates() {
    let doc = three_frame_doc();
    doc.validate().unwrap();
    assert_eq!(doc.frame_count(), 3);
}

#[test]
fn validate_catches_out_point_mismatch() {
    let mut doc = three_frame_doc();
    doc.out_point = 2.0;
    assert!(matches!(
        doc.validate(),
        Err(ConvertError::SerializationFailure(_))
    ));
}

#[test]
fn validate_catches_dangling_reference() {
    let mut doc = three_frame_doc();
    doc.layers[1].ref_id = "img_0".to_string();
    assert!(doc.validate().is_err());
}

#[test]
fn validate_catches_missing_asset() {
    let mut doc = three_frame_doc();
    doc.assets.pop();
    assert!(doc.validate().is_err());
}

#[test]
fn validate_catches_bad_layer_window() {
    let mut doc = three_frame_doc();
    doc.layers[2].in_point = 1.0;
    assert!(doc.validate().is_err());
}

#[test]
fn validate_catches_duplicate_ids() {
    let mut doc = three_frame_doc();
    doc.assets[2].id = "img_1".to_string();
    assert!(doc.validate().is_err());
}
