use crate::{
    codec::EncodedFrame,
    foundation::{
        core::Canvas,
        error::{ConvertError, ConvertResult},
    },
};

use super::model::{
    AnimationDocument, Asset, BLEND_NORMAL, IMAGE_LAYER, LOTTIE_VERSION, Layer, Transform,
    asset_id,
};

/// Pick the document canvas: the requested size when set, otherwise the first frame's size.
///
/// `first_frame` is only invoked when no size was requested.
pub fn resolve_canvas(
    requested: Option<Canvas>,
    first_frame: impl FnOnce() -> ConvertResult<Canvas>,
) -> ConvertResult<Canvas> {
    match requested {
        Some(canvas) => Ok(canvas),
        None => first_frame(),
    }
}

/// Accumulates one asset + layer pair per frame, strictly in frame order.
#[derive(Debug)]
pub struct DocumentBuilder {
    canvas: Canvas,
    doc: AnimationDocument,
}

impl DocumentBuilder {
    pub fn new(frame_rate: f64, canvas: Canvas, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            canvas,
            doc: AnimationDocument {
                version: LOTTIE_VERSION.to_string(),
                frame_rate,
                in_point: 0.0,
                out_point: 0.0,
                width: canvas.width,
                height: canvas.height,
                name: (!name.is_empty()).then_some(name),
                three_d: 0,
                assets: Vec::new(),
                layers: Vec::new(),
                markers: Vec::new(),
            },
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of frames appended so far; also the next expected position.
    pub fn len(&self) -> usize {
        self.doc.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.layers.is_empty()
    }

    /// Append frame `position`. Positions must arrive as `0, 1, 2, ...`.
    pub fn append(
        &mut self,
        position: usize,
        payload: impl Into<String>,
        width: u32,
        height: u32,
    ) -> ConvertResult<()> {
        let expected = self.len();
        if position != expected {
            return Err(ConvertError::internal(format!(
                "frame {position} appended out of order (expected {expected})"
            )));
        }
        let index = u32::try_from(position + 1)
            .map_err(|_| ConvertError::internal("frame count exceeds layer index range"))?;

        let id = asset_id(position);
        self.doc.assets.push(Asset {
            id: id.clone(),
            width,
            height,
            dir: String::new(),
            payload: payload.into(),
            embedded: 1,
        });
        self.doc.layers.push(Layer {
            three_d: 0,
            index,
            layer_type: IMAGE_LAYER,
            name: Some(format!("Frame_{position}")),
            ref_id: id,
            stretch: 1.0,
            transform: Transform::centered(self.canvas.center()),
            auto_orient: 0,
            in_point: position as f64,
            out_point: (position + 1) as f64,
            start_time: 0.0,
            blend_mode: BLEND_NORMAL,
        });
        Ok(())
    }

    pub fn append_frame(&mut self, position: usize, frame: EncodedFrame) -> ConvertResult<()> {
        self.append(position, frame.data_uri, frame.width, frame.height)
    }

    /// Set the root out-point to the frame count and hand back the finished document.
    pub fn finalize(mut self) -> ConvertResult<AnimationDocument> {
        if self.is_empty() {
            return Err(ConvertError::EmptyInput);
        }
        self.doc.out_point = self.len() as f64;
        self.doc.validate()?;
        Ok(self.doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/builder.rs"]
mod tests;
