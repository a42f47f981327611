//! Frame acquisition: input tagging, ordering and video sampling.

pub mod ffmpeg;
pub mod frames;
pub mod input;
pub mod video;
