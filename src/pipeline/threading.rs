use crate::foundation::error::{ConvertError, ConvertResult};

/// Worker-pool controls for frame encoding.
///
/// Frames are encoded in chunks; each chunk is collected in frame order before it reaches the
/// document builder, so memory stays bounded by `chunk_size` regardless of total frame count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threading {
    /// Encode frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Frames per scheduling chunk.
    pub chunk_size: usize,
    /// Optional explicit worker count.
    pub threads: Option<usize>,
}

impl Default for Threading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

impl Threading {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            parallel: true,
            threads,
            ..Self::default()
        }
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ConvertResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ConvertError::invalid_config(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("framelottie-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ConvertError::internal(format!("failed to build rayon thread pool: {e}")))
}

pub(crate) fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/threading.rs"]
mod tests;
