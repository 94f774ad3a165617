//! Thumbnail decode error types.

use thiserror::Error;

/// Errors raised while probing or decoding a source image.
///
/// Decode failures are silent from the gallery's point of view: the slot
/// keeps its placeholder and a later request retries. These variants exist
/// for logging and for tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DecodeError {
    #[error("source not readable: {message}")]
    Unreadable { message: String },

    #[error("source malformed: {message}")]
    Malformed { message: String },

    #[error("decode task panicked: {message}")]
    TaskPanicked { message: String },
}

impl DecodeError {
    /// Creates an unreadable-source error.
    #[must_use]
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::Unreadable {
            message: message.into(),
        }
    }

    /// Creates a malformed-source error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a panicked-task error.
    #[must_use]
    pub fn task_panicked(message: impl Into<String>) -> Self {
        Self::TaskPanicked {
            message: message.into(),
        }
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::unreadable(io.to_string()),
            other => Self::malformed(other.to_string()),
        }
    }
}
