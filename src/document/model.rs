use std::collections::HashSet;

use crate::foundation::error::{ConvertError, ConvertResult};

pub const LOTTIE_VERSION: &str = "5.7.4";
/// `ty` value for an image layer.
pub const IMAGE_LAYER: u8 = 2;
/// `bm` value for normal blending.
pub const BLEND_NORMAL: u8 = 0;

pub fn asset_id(position: usize) -> String {
    format!("img_{position}")
}

/// Root of a Lottie scene graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDocument {
    #[serde(rename = "v")]
    pub version: String,
    #[serde(rename = "fr")]
    pub frame_rate: f64,
    #[serde(rename = "ip")]
    pub in_point: f64,
    #[serde(rename = "op")]
    pub out_point: f64,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
    #[serde(rename = "nm", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "ddd")]
    pub three_d: u8,
    pub assets: Vec<Asset>,
    pub layers: Vec<Layer>,
    /// Reserved; always empty.
    pub markers: Vec<serde_json::Value>,
}

/// One embedded raster frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
    /// Directory prefix; empty for embedded data.
    #[serde(rename = "u")]
    pub dir: String,
    /// Data URI payload.
    #[serde(rename = "p")]
    pub payload: String,
    #[serde(rename = "e")]
    pub embedded: u8,
}

/// An image layer showing one asset over `[ip, op)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    #[serde(rename = "ddd")]
    pub three_d: u8,
    #[serde(rename = "ind")]
    pub index: u32,
    #[serde(rename = "ty")]
    pub layer_type: u8,
    #[serde(rename = "nm", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "refId")]
    pub ref_id: String,
    #[serde(rename = "sr")]
    pub stretch: f64,
    #[serde(rename = "ks")]
    pub transform: Transform,
    #[serde(rename = "ao")]
    pub auto_orient: u8,
    #[serde(rename = "ip")]
    pub in_point: f64,
    #[serde(rename = "op")]
    pub out_point: f64,
    #[serde(rename = "st")]
    pub start_time: f64,
    #[serde(rename = "bm")]
    pub blend_mode: u8,
}

/// Static layer pose. Every property is a hold (`a == 0`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    #[serde(rename = "o")]
    pub opacity: Property<f64>,
    #[serde(rename = "r")]
    pub rotation: Property<f64>,
    #[serde(rename = "p")]
    pub position: Property<[f64; 3]>,
    #[serde(rename = "a")]
    pub anchor: Property<[f64; 3]>,
    #[serde(rename = "s")]
    pub scale: Property<[f64; 3]>,
}

impl Transform {
    /// Full opacity, no rotation, 100% scale, position and anchor at `center`.
    pub fn centered(center: [f64; 3]) -> Self {
        Self {
            opacity: Property::fixed(100.0),
            rotation: Property::fixed(0.0),
            position: Property::fixed(center),
            anchor: Property::fixed(center),
            scale: Property::fixed([100.0, 100.0, 100.0]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Property<T> {
    #[serde(rename = "a")]
    pub animated: u8,
    #[serde(rename = "k")]
    pub value: T,
}

impl<T> Property<T> {
    pub fn fixed(value: T) -> Self {
        Self { animated: 0, value }
    }
}

impl AnimationDocument {
    pub fn frame_count(&self) -> usize {
        self.layers.len()
    }

    /// Check the structural invariants every produced document must satisfy.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConvertError::serialization(format!(
                "document size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.assets.len() != self.layers.len() {
            return Err(ConvertError::serialization(format!(
                "asset count {} does not match layer count {}",
                self.assets.len(),
                self.layers.len()
            )));
        }
        if self.out_point != self.layers.len() as f64 {
            return Err(ConvertError::serialization(format!(
                "out-point {} does not match frame count {}",
                self.out_point,
                self.layers.len()
            )));
        }
        if !self.markers.is_empty() {
            return Err(ConvertError::serialization("markers must be empty"));
        }

        let mut seen = HashSet::with_capacity(self.assets.len());
        for (i, (asset, layer)) in self.assets.iter().zip(&self.layers).enumerate() {
            if asset.id != asset_id(i) {
                return Err(ConvertError::serialization(format!(
                    "asset {i} has id '{}', expected '{}'",
                    asset.id,
                    asset_id(i)
                )));
            }
            if !seen.insert(asset.id.as_str()) {
                return Err(ConvertError::serialization(format!(
                    "duplicate asset id '{}'",
                    asset.id
                )));
            }
            if layer.index as usize != i + 1
                || layer.in_point != i as f64
                || layer.out_point != (i + 1) as f64
            {
                return Err(ConvertError::serialization(format!(
                    "layer {i} has index {} and window [{}, {}), expected {} and [{i}, {})",
                    layer.index,
                    layer.in_point,
                    layer.out_point,
                    i + 1,
                    i + 1
                )));
            }
            if layer.ref_id != asset.id {
                return Err(ConvertError::serialization(format!(
                    "layer {i} references '{}', expected '{}'",
                    layer.ref_id, asset.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
