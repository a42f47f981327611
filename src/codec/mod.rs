//! Per-frame decode, resize and re-encode.
//!
//! The pipeline only talks to [`FrameCodec`]; [`ImageCodec`] is the default implementation on top
//! of the `image` crate.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::foundation::{
    core::Canvas,
    error::{ConvertError, ConvertResult},
};

pub mod image_codec;

pub use image_codec::ImageCodec;

/// Decoded RGBA8 pixels, orientation already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8.
    pub data: Vec<u8>,
    /// `true` when `data` holds premultiplied alpha.
    pub premultiplied: bool,
}

impl Pixels {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Encoded image bytes plus their MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn to_data_uri(&self) -> String {
        data_uri(self.mime, &self.bytes)
    }
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// Capability interface for turning source bytes into an embeddable image.
///
/// Implementations must be deterministic: the same input and target size produce the same bytes.
pub trait FrameCodec: Send + Sync {
    /// Decode bytes into RGBA8, honoring embedded orientation metadata.
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<Pixels>;
    /// Resample to exactly `width x height`.
    fn resize(&self, pixels: Pixels, width: u32, height: u32) -> anyhow::Result<Pixels>;
    /// Losslessly encode for embedding.
    fn encode(&self, pixels: &Pixels) -> anyhow::Result<EncodedImage>;

    /// Oriented size in pixels. The default decodes the whole frame.
    fn dimensions(&self, bytes: &[u8]) -> anyhow::Result<(u32, u32)> {
        Ok(self.decode(bytes)?.dimensions())
    }
}

/// One frame ready to be appended to a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
}

/// Decode, optionally resize to `target`, and encode one frame.
///
/// With `target == None` the frame keeps its native (oriented) size.
pub fn encode_frame(
    codec: &dyn FrameCodec,
    position: usize,
    bytes: &[u8],
    target: Option<Canvas>,
) -> ConvertResult<EncodedFrame> {
    let pixels = codec
        .decode(bytes)
        .map_err(|e| ConvertError::decode_failure(position, format!("{e:#}")))?;

    let pixels = match target {
        Some(canvas) if pixels.dimensions() != (canvas.width, canvas.height) => codec
            .resize(pixels, canvas.width, canvas.height)
            .map_err(|e| ConvertError::encode_failure(position, format!("{e:#}")))?,
        _ => pixels,
    };

    let encoded = codec
        .encode(&pixels)
        .map_err(|e| ConvertError::encode_failure(position, format!("{e:#}")))?;

    Ok(EncodedFrame {
        data_uri: encoded.to_data_uri(),
        width: pixels.width,
        height: pixels.height,
    })
}

/// Native (oriented) dimensions of a frame, used to resolve an unset canvas.
pub fn probe_canvas(codec: &dyn FrameCodec, position: usize, bytes: &[u8]) -> ConvertResult<Canvas> {
    let (width, height) = codec
        .dimensions(bytes)
        .map_err(|e| ConvertError::decode_failure(position, format!("{e:#}")))?;
    Canvas::new(width, height)
        .map_err(|_| ConvertError::decode_failure(position, "frame has an empty image"))
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mod.rs"]
mod tests;
