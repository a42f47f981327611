pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("empty input: no frames resolved from the source")]
    EmptyInput,

    #[error("decode failure at frame {position}: {reason}")]
    DecodeFailure { position: usize, reason: String },

    #[error("encode failure at frame {position}: {reason}")]
    EncodeFailure { position: usize, reason: String },

    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("cancellation requested")]
    CancellationRequested,

    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    #[error("media tool error: {0}")]
    Media(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    pub fn decode_failure(position: usize, reason: impl Into<String>) -> Self {
        Self::DecodeFailure {
            position,
            reason: reason.into(),
        }
    }

    pub fn encode_failure(position: usize, reason: impl Into<String>) -> Self {
        Self::EncodeFailure {
            position,
            reason: reason.into(),
        }
    }

    pub fn unsupported_source(msg: impl Into<String>) -> Self {
        Self::UnsupportedSource(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationFailure(msg.into())
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Frame position the failure is attributed to, when there is one.
    pub fn frame_position(&self) -> Option<usize> {
        match self {
            Self::DecodeFailure { position, .. } | Self::EncodeFailure { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::CancellationRequested)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
