use std::path::Path;

use crate::foundation::error::{ConvertError, ConvertResult};

/// Capability interface for probing and sampling a video timeline.
pub trait VideoSampler: Send + Sync {
    /// Total container duration in seconds.
    fn duration_secs(&self, video: &Path) -> anyhow::Result<f64>;

    /// Extract the frame nearest to `at_secs` as standalone encoded image bytes.
    fn sample(&self, video: &Path, at_secs: f64) -> anyhow::Result<Vec<u8>>;
}

/// Upper bound on frames sampled from one video.
pub const MAX_VIDEO_SAMPLES: usize = 100_000;

/// Sample timestamps `k / frame_rate` for every `k` with timestamp `< duration_secs`.
///
/// Timestamps are computed from the index rather than accumulated, so long videos do not drift.
/// A timeline needing more than [`MAX_VIDEO_SAMPLES`] samples is rejected as `InvalidConfig`.
pub fn sample_times(duration_secs: f64, frame_rate: f64) -> ConvertResult<Vec<f64>> {
    if !duration_secs.is_finite()
        || duration_secs <= 0.0
        || !frame_rate.is_finite()
        || frame_rate <= 0.0
    {
        return Ok(Vec::new());
    }

    let planned = (duration_secs * frame_rate).ceil();
    if !(planned <= MAX_VIDEO_SAMPLES as f64) {
        return Err(ConvertError::invalid_config(format!(
            "sampling {duration_secs}s at {frame_rate} fps needs {planned} frames, \
             limit is {MAX_VIDEO_SAMPLES}"
        )));
    }

    let mut out = Vec::with_capacity(planned as usize);
    let mut k = 0u64;
    loop {
        let t = k as f64 / frame_rate;
        if t >= duration_secs {
            break;
        }
        out.push(t);
        k += 1;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/source/video.rs"]
mod tests;
