use std::path::{Path, PathBuf};

use crate::foundation::{
    core::CancelToken,
    error::{ConvertError, ConvertResult},
};

use super::{
    input::MediaInput,
    video::{VideoSampler, sample_times},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Inputs are frames, ordered by file name.
    ImageSequence,
    /// A single video sampled at the output frame rate.
    VideoSampling,
}

pub fn select_policy(inputs: &[MediaInput]) -> SelectionPolicy {
    match inputs {
        [only] if only.is_video() => SelectionPolicy::VideoSampling,
        _ => SelectionPolicy::ImageSequence,
    }
}

/// Sort inputs by case-normalized file name.
///
/// Callers are expected to name frames so that this order is temporal order (zero-padded indices).
pub fn sort_lexicographic(inputs: &mut [MediaInput]) {
    inputs.sort_by_cached_key(|i| {
        let name = i.display_name();
        (name.to_lowercase(), name)
    });
}

/// One decodable frame, resolved once by the pipeline.
#[derive(Debug)]
pub struct FrameHandle {
    pub position: usize,
    pub path: PathBuf,
    transient: bool,
}

impl FrameHandle {
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn read_bytes(&self) -> ConvertResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            ConvertError::decode_failure(
                self.position,
                format!("read '{}': {e}", self.path.display()),
            )
        })
    }
}

/// Per-run temporary directory holding extracted video samples.
///
/// Dropping the store removes the directory and anything still in it.
#[derive(Debug)]
pub struct TransientStore {
    dir: tempfile::TempDir,
}

impl TransientStore {
    pub fn new() -> ConvertResult<Self> {
        Self::new_in(None)
    }

    /// Create the store under `root`, or under the system temp directory when `None`.
    pub fn new_in(root: Option<&Path>) -> ConvertResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("framelottie-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| ConvertError::io(format!("create temporary frame directory: {e}")))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, index: usize, bytes: &[u8]) -> ConvertResult<PathBuf> {
        let path = self.dir.path().join(format!("frame_{index:04}.png"));
        std::fs::write(&path, bytes)
            .map_err(|e| ConvertError::io(format!("write '{}': {e}", path.display())))?;
        Ok(path)
    }

    /// Best-effort removal of one extracted frame; failures are logged and ignored.
    pub fn reclaim(&self, path: &Path) {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::debug!(path = %path.display(), "ignoring transient cleanup failure: {e}");
        }
    }
}

/// Ordered, finite frames for one run, plus ownership of any transient files.
#[derive(Debug)]
pub struct FrameSequence {
    pub policy: SelectionPolicy,
    pub handles: Vec<FrameHandle>,
    pub store: Option<TransientStore>,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Release a frame's transient file once it has been encoded.
    pub fn reclaim(&self, handle: &FrameHandle) {
        if handle.transient
            && let Some(store) = &self.store
        {
            store.reclaim(&handle.path);
        }
    }
}

/// Resolve `inputs` into an ordered frame sequence.
///
/// A single video input is sampled at `frame_rate`; anything else is treated as an image
/// sequence sorted by name. An empty result is returned as-is; the caller decides whether that is
/// fatal.
pub fn acquire(
    inputs: Vec<MediaInput>,
    frame_rate: f64,
    sampler: &dyn VideoSampler,
    cancel: &CancelToken,
) -> ConvertResult<FrameSequence> {
    acquire_in(inputs, frame_rate, sampler, cancel, None)
}

/// [`acquire`], placing transient video samples under `scratch_root` when given.
#[tracing::instrument(skip(inputs, sampler, cancel), fields(input_count = inputs.len()))]
pub fn acquire_in(
    mut inputs: Vec<MediaInput>,
    frame_rate: f64,
    sampler: &dyn VideoSampler,
    cancel: &CancelToken,
    scratch_root: Option<&Path>,
) -> ConvertResult<FrameSequence> {
    let policy = select_policy(&inputs);
    match policy {
        SelectionPolicy::ImageSequence => {
            sort_lexicographic(&mut inputs);
            let handles = inputs
                .into_iter()
                .enumerate()
                .map(|(position, input)| FrameHandle {
                    position,
                    path: input.path,
                    transient: false,
                })
                .collect();
            Ok(FrameSequence {
                policy,
                handles,
                store: None,
            })
        }
        SelectionPolicy::VideoSampling => {
            let video = inputs.remove(0);
            sample_video(&video.path, frame_rate, sampler, cancel, scratch_root)
        }
    }
}

fn sample_video(
    video: &Path,
    frame_rate: f64,
    sampler: &dyn VideoSampler,
    cancel: &CancelToken,
    scratch_root: Option<&Path>,
) -> ConvertResult<FrameSequence> {
    let duration = sampler
        .duration_secs(video)
        .map_err(|e| ConvertError::media(format!("{e:#}")))?;
    let times = sample_times(duration, frame_rate)?;
    tracing::debug!(
        duration,
        frame_rate,
        samples = times.len(),
        "sampling video timeline"
    );

    let store = TransientStore::new_in(scratch_root)?;
    let mut handles = Vec::with_capacity(times.len());
    for (k, &t) in times.iter().enumerate() {
        cancel.check()?;
        match sampler.sample(video, t) {
            Ok(bytes) => {
                let position = handles.len();
                let path = store.write(position, &bytes)?;
                handles.push(FrameHandle {
                    position,
                    path,
                    transient: true,
                });
            }
            Err(e) if k == 0 => {
                tracing::warn!("first video sample failed, producing no frames: {e:#}");
                break;
            }
            Err(e) => {
                tracing::warn!(at_secs = t, "skipping video sample: {e:#}");
            }
        }
    }

    Ok(FrameSequence {
        policy: SelectionPolicy::VideoSampling,
        handles,
        store: Some(store),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/frames.rs"]
mod tests;
