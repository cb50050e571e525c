//! Error types for payload generation.

/// Payload generation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntruderError {
    /// Base value could not be decoded.
    #[error("decode failed: {reason}")]
    Decode { reason: String },

    /// Mutation position is past the end of the decoded buffer.
    #[error("position {position} out of range for buffer of length {len}")]
    PositionOutOfRange { position: usize, len: usize },

    /// Generator was asked for a payload after it ran out.
    #[error("payload generator exhausted")]
    Exhausted,

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl IntruderError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Decode { .. } => 3,
            // Driver ignored has_more_payloads()
            Self::PositionOutOfRange { .. } => 4,
            Self::Exhausted => 4,
        }
    }
}

/// Result type for payload generation.
pub type IntruderResult<T> = Result<T, IntruderError>;
