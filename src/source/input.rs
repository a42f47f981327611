use std::path::{Path, PathBuf};

use crate::foundation::error::{ConvertError, ConvertResult};

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "ico", "tga", "pnm", "qoi",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "avi", "mkv", "webm", "wmv", "mpg", "mpeg"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

/// A source file tagged as image or video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaInput {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaInput {
    pub fn new(path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::new(path, MediaKind::Image)
    }

    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self::new(path, MediaKind::Video)
    }

    /// Tag `path` by its extension; anything neither image nor video is `UnsupportedSource`.
    pub fn from_path(path: impl Into<PathBuf>) -> ConvertResult<Self> {
        let path = path.into();
        match classify(&path) {
            Some(kind) => Ok(Self { path, kind }),
            None => Err(ConvertError::unsupported_source(format!(
                "'{}' is neither an image nor a video",
                path.display()
            ))),
        }
    }

    /// File name used for sequence ordering.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

pub fn classify(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Turn user-supplied paths into tagged inputs.
///
/// Directories contribute their image files (not recursive). Files that are neither image nor
/// video are reported and left out.
pub fn discover(paths: &[PathBuf]) -> ConvertResult<Vec<MediaInput>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = std::fs::read_dir(path).map_err(|e| {
                ConvertError::io(format!("read directory '{}': {e}", path.display()))
            })?;
            for entry in entries {
                let entry = entry.map_err(|e| {
                    ConvertError::io(format!("read directory '{}': {e}", path.display()))
                })?;
                let p = entry.path();
                if p.is_file() && classify(&p) == Some(MediaKind::Image) {
                    out.push(MediaInput::image(p));
                }
            }
            continue;
        }

        match MediaInput::from_path(path.clone()) {
            Ok(input) => out.push(input),
            Err(e) => tracing::warn!("skipping input: {e}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/source/input.rs"]
mod tests;
