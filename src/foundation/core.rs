use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::foundation::error::{ConvertError, ConvertResult};

/// Output canvas size in pixels. Both dimensions are non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CanvasRepr")]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

#[derive(serde::Deserialize)]
struct CanvasRepr {
    width: u32,
    height: u32,
}

impl TryFrom<CanvasRepr> for Canvas {
    type Error = ConvertError;

    fn try_from(repr: CanvasRepr) -> Result<Self, Self::Error> {
        Canvas::new(repr.width, repr.height)
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> ConvertResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConvertError::invalid_config(format!(
                "canvas must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Center point `(w/2, h/2, 0)` used for layer position and anchor.
    pub fn center(self) -> [f64; 3] {
        [f64::from(self.width) / 2.0, f64::from(self.height) / 2.0, 0.0]
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Cooperative cancellation flag shared between a run and its caller.
///
/// Cancellation is observed between frames, never in the middle of one.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Return `CancellationRequested` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> ConvertResult<()> {
        if self.is_cancelled() {
            Err(ConvertError::CancellationRequested)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
