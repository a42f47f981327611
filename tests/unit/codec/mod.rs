use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([x as u8, y as u8, (x + y) as u8, 255])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn data_uri_carries_mime_and_base64() {
    assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
}

#[test]
fn encode_frame_keeps_native_size_without_target() {
    let codec = ImageCodec::new();
    let frame = encode_frame(&codec, 0, &png(9, 5), None).unwrap();
    assert_eq!((frame.width, frame.height), (9, 5));
    assert!(frame.data_uri.starts_with("data:image/png;base64,"));
}

#[test]
fn encode_frame_resizes_to_target() {
    let codec = ImageCodec::new();
    let target = Canvas::new(4, 6).unwrap();
    let frame = encode_frame(&codec, 0, &png(9, 5), Some(target)).unwrap();
    assert_eq!((frame.width, frame.height), (4, 6));

    let again = encode_frame(&codec, 0, &png(9, 5), Some(target)).unwrap();
    assert_eq!(frame, again);
}

#[test]
fn encode_frame_reports_decode_failure_with_position() {
    let codec = ImageCodec::new();
    let err = encode_frame(&codec, 4, b"nope", None).unwrap_err();
    assert!(matches!(err, ConvertError::DecodeFailure { position: 4, .. }));
}

#[test]
fn probe_canvas_reads_native_size() {
    let codec = ImageCodec::new();
    assert_eq!(
        probe_canvas(&codec, 0, &png(12, 3)).unwrap(),
        Canvas::new(12, 3).unwrap()
    );
    assert!(matches!(
        probe_canvas(&codec, 0, b"junk"),
        Err(ConvertError::DecodeFailure { position: 0, .. })
    ));
}
