use crate::foundation::{
    core::Canvas,
    error::{ConvertError, ConvertResult},
};

pub const DEFAULT_FRAME_RATE: f64 = 30.0;
pub const DEFAULT_DOCUMENT_NAME: &str = "Converted Animation";

/// Caller-facing conversion settings.
///
/// Width/height are signed so that negative input can be rejected instead of wrapping.
/// A zero in either dimension means "use the first frame's native size".
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub frame_rate: f64,
    pub target_width: i64,
    pub target_height: i64,
    pub document_name: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            target_width: 0,
            target_height: 0,
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
        }
    }
}

/// Validated settings consumed by the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub frame_rate: f64,
    pub target: Option<Canvas>,
    pub document_name: String,
}

impl ConvertConfig {
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_resolution(mut self, width: i64, height: i64) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    pub fn resolve(&self) -> ConvertResult<ResolvedConfig> {
        if self.target_width < 0 || self.target_height < 0 {
            return Err(ConvertError::invalid_config(format!(
                "target resolution must not be negative, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        let width = u32::try_from(self.target_width).map_err(|_| {
            ConvertError::invalid_config(format!("target width {} is too large", self.target_width))
        })?;
        let height = u32::try_from(self.target_height).map_err(|_| {
            ConvertError::invalid_config(format!(
                "target height {} is too large",
                self.target_height
            ))
        })?;

        let target = if width == 0 || height == 0 {
            None
        } else {
            Some(Canvas::new(width, height)?)
        };

        let frame_rate = if self.frame_rate.is_finite() && self.frame_rate > 0.0 {
            self.frame_rate
        } else {
            tracing::warn!(
                frame_rate = self.frame_rate,
                "non-positive frame rate, falling back to {DEFAULT_FRAME_RATE}"
            );
            DEFAULT_FRAME_RATE
        };

        Ok(ResolvedConfig {
            frame_rate,
            target,
            document_name: self.document_name.clone(),
        })
    }
}

/// Parse a frame rate from free text; anything unusable becomes the default.
pub fn parse_frame_rate_lenient(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_FRAME_RATE,
    }
}

/// Parse `WxH`, `W,H` or `original`/`native` into a signed `(width, height)` pair.
///
/// `original` maps to `(0, 0)`. Sign checks happen later in [`ConvertConfig::resolve`].
pub fn parse_resolution(text: &str) -> ConvertResult<(i64, i64)> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("original") || t.eq_ignore_ascii_case("native") {
        return Ok((0, 0));
    }

    let Some((w, h)) = t.split_once(['x', 'X', ',']) else {
        return Err(ConvertError::invalid_config(format!(
            "malformed resolution '{t}' (expected WxH)"
        )));
    };
    let parse = |s: &str| {
        s.trim().parse::<i64>().map_err(|e| {
            ConvertError::invalid_config(format!("malformed resolution '{t}': {e}"))
        })
    };
    Ok((parse(w)?, parse(h)?))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
