use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    codec::{EncodedFrame, FrameCodec, ImageCodec, encode_frame, probe_canvas},
    config::ConvertConfig,
    document::{
        builder::{DocumentBuilder, resolve_canvas},
        model::AnimationDocument,
        serialize,
    },
    foundation::{
        core::{CancelToken, Canvas},
        error::{ConvertError, ConvertResult},
    },
    source::{
        ffmpeg::FfmpegSampler,
        frames::{FrameHandle, FrameSequence, acquire_in},
        input::MediaInput,
        video::VideoSampler,
    },
};

use super::threading::{Threading, build_thread_pool, normalized_chunk_size};

/// Receives the completed fraction (`0.0..=1.0`) as frames finish. Values never decrease.
pub trait ProgressObserver: Sync {
    fn on_progress(&self, fraction: f64);
}

impl<F> ProgressObserver for F
where
    F: Fn(f64) + Sync,
{
    fn on_progress(&self, fraction: f64) {
        self(fraction)
    }
}

/// Caller-side handles for one run: cooperative cancellation and progress reporting.
#[derive(Clone, Default)]
pub struct RunControl<'a> {
    pub cancel: CancelToken,
    pub progress: Option<&'a dyn ProgressObserver>,
}

impl<'a> RunControl<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressObserver) -> Self {
        self.progress = Some(progress);
        self
    }

    fn report(&self, fraction: f64) {
        if let Some(p) = self.progress {
            p.on_progress(fraction.clamp(0.0, 1.0));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// A finished conversion plus run metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionOutput {
    pub document: AnimationDocument,
    pub frame_count: usize,
    pub canvas: Canvas,
}

impl ConversionOutput {
    /// Compact Lottie JSON for the caller to persist.
    pub fn to_json_bytes(&self) -> ConvertResult<Vec<u8>> {
        serialize::to_vec(&self.document)
    }
}

/// Frame-to-animation conversion job.
///
/// One run at a time: [`run`](Self::run) takes `&mut self`, so starting another while one is in
/// flight is ruled out by the caller's own ownership of the converter.
pub struct Converter {
    codec: Box<dyn FrameCodec>,
    sampler: Box<dyn VideoSampler>,
    threading: Threading,
    scratch_dir: Option<PathBuf>,
    state: RunState,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            codec: Box::new(ImageCodec::default()),
            sampler: Box::new(FfmpegSampler),
            threading: Threading::default(),
            scratch_dir: None,
            state: RunState::Idle,
        }
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("threading", &self.threading)
            .field("scratch_dir", &self.scratch_dir)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codec(mut self, codec: impl FrameCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn with_sampler(mut self, sampler: impl VideoSampler + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn with_threading(mut self, threading: Threading) -> Self {
        self.threading = threading;
        self
    }

    /// Directory under which the per-run folder of sampled video frames is created.
    /// Defaults to the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Convert `inputs` into a Lottie document.
    ///
    /// Any failure, including cancellation, discards all work; no partial document is returned.
    /// Transient video samples are removed on every exit path.
    #[tracing::instrument(skip_all, fields(input_count = inputs.len()))]
    pub fn run(
        &mut self,
        inputs: Vec<MediaInput>,
        config: &ConvertConfig,
        control: &RunControl<'_>,
    ) -> ConvertResult<ConversionOutput> {
        self.state = RunState::Running;
        let result = self.execute(inputs, config, control);
        self.state = match &result {
            Ok(out) => {
                tracing::info!(
                    frames = out.frame_count,
                    canvas = %out.canvas,
                    "conversion completed"
                );
                RunState::Completed
            }
            Err(e) if e.is_cancelled() => {
                tracing::info!("conversion cancelled");
                RunState::Cancelled
            }
            Err(e) => {
                tracing::warn!("conversion failed: {e}");
                RunState::Failed
            }
        };
        result
    }

    fn execute(
        &self,
        inputs: Vec<MediaInput>,
        config: &ConvertConfig,
        control: &RunControl<'_>,
    ) -> ConvertResult<ConversionOutput> {
        let resolved = config.resolve()?;
        control.cancel.check()?;

        let sequence = acquire_in(
            inputs,
            resolved.frame_rate,
            self.sampler.as_ref(),
            &control.cancel,
            self.scratch_dir.as_deref(),
        )?;
        if sequence.is_empty() {
            return Err(ConvertError::EmptyInput);
        }
        let total = sequence.len();

        let canvas = resolve_canvas(resolved.target, || {
            let first = &sequence.handles[0];
            probe_canvas(self.codec.as_ref(), first.position, &first.read_bytes()?)
        })?;
        tracing::info!(
            frames = total,
            canvas = %canvas,
            policy = ?sequence.policy,
            frame_rate = resolved.frame_rate,
            "encoding frames"
        );

        let mut builder = DocumentBuilder::new(resolved.frame_rate, canvas, resolved.document_name);
        control.report(0.0);
        if self.threading.parallel {
            self.encode_parallel(&sequence, canvas, &mut builder, control)?;
        } else {
            self.encode_sequential(&sequence, canvas, &mut builder, control)?;
        }

        let document = builder.finalize()?;
        Ok(ConversionOutput {
            document,
            frame_count: total,
            canvas,
        })
    }

    fn encode_sequential(
        &self,
        sequence: &FrameSequence,
        canvas: Canvas,
        builder: &mut DocumentBuilder,
        control: &RunControl<'_>,
    ) -> ConvertResult<()> {
        let total = sequence.len();
        for handle in &sequence.handles {
            control.cancel.check()?;
            let frame = encode_handle(self.codec.as_ref(), handle, canvas)?;
            append_encoded(sequence, builder, handle, frame)?;
            control.report(builder.len() as f64 / total as f64);
        }
        Ok(())
    }

    fn encode_parallel(
        &self,
        sequence: &FrameSequence,
        canvas: Canvas,
        builder: &mut DocumentBuilder,
        control: &RunControl<'_>,
    ) -> ConvertResult<()> {
        let pool = build_thread_pool(self.threading.threads)?;
        let chunk_size = normalized_chunk_size(self.threading.chunk_size);
        let total = sequence.len();
        let codec = self.codec.as_ref();
        let cancel = &control.cancel;

        for chunk in sequence.handles.chunks(chunk_size) {
            cancel.check()?;
            // Collecting an indexed parallel iterator keeps positional order.
            let encoded: Vec<ConvertResult<EncodedFrame>> = pool.install(|| {
                chunk
                    .par_iter()
                    .map(|handle| {
                        cancel.check()?;
                        encode_handle(codec, handle, canvas)
                    })
                    .collect()
            });

            for (handle, frame) in chunk.iter().zip(encoded) {
                append_encoded(sequence, builder, handle, frame?)?;
                control.report(builder.len() as f64 / total as f64);
            }
        }
        Ok(())
    }
}

fn encode_handle(
    codec: &dyn FrameCodec,
    handle: &FrameHandle,
    canvas: Canvas,
) -> ConvertResult<EncodedFrame> {
    let bytes = handle.read_bytes()?;
    encode_frame(codec, handle.position, &bytes, Some(canvas))
}

fn append_encoded(
    sequence: &FrameSequence,
    builder: &mut DocumentBuilder,
    handle: &FrameHandle,
    frame: EncodedFrame,
) -> ConvertResult<()> {
    builder.append_frame(handle.position, frame)?;
    sequence.reclaim(handle);
    tracing::debug!(position = handle.position, "frame appended");
    Ok(())
}

/// Convert with the default codec and sampler, sequentially, without cancellation or progress.
pub fn convert(inputs: Vec<MediaInput>, config: &ConvertConfig) -> ConvertResult<ConversionOutput> {
    Converter::new().run(inputs, config, &RunControl::default())
}
