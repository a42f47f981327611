//! framelottie turns an ordered image sequence, or a single sampled video, into a Lottie
//! animation document whose frames are embedded PNG image layers.
//!
//! The library surface is small:
//!
//! - Resolve inputs with [`discover`] or build [`MediaInput`]s directly
//! - Configure a run with [`ConvertConfig`]
//! - Run a [`Converter`] (or the [`convert`] shortcut) and persist the resulting
//!   [`AnimationDocument`] with [`write_file`]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod document;
pub mod foundation;
pub mod pipeline;
pub mod source;

pub use crate::codec::{EncodedFrame, EncodedImage, FrameCodec, ImageCodec, Pixels};
pub use crate::config::{ConvertConfig, ResolvedConfig, parse_frame_rate_lenient, parse_resolution};
pub use crate::document::{
    builder::DocumentBuilder,
    model::{AnimationDocument, Asset, LOTTIE_VERSION, Layer},
    serialize::{read_file, to_vec, write_file},
};
pub use crate::foundation::core::{CancelToken, Canvas};
pub use crate::foundation::error::{ConvertError, ConvertResult};
pub use crate::pipeline::{
    ConversionOutput, Converter, ProgressObserver, RunControl, RunState, Threading, convert,
};
pub use crate::source::{
    ffmpeg::FfmpegSampler,
    input::{MediaInput, MediaKind, discover},
    video::VideoSampler,
};
