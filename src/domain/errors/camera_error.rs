//! Camera enumeration error types.

use thiserror::Error;

/// Errors raised while talking to the platform camera service.
///
/// Every variant is recoverable: callers degrade to a legacy capture path
/// rather than surfacing these to the user.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CameraError {
    #[error("device enumeration failed: {message}")]
    EnumerationFailed { message: String },

    #[error("device {id} is unavailable: {message}")]
    DeviceUnavailable { id: String, message: String },
}

impl CameraError {
    /// Creates an enumeration failure.
    #[must_use]
    pub fn enumeration(message: impl Into<String>) -> Self {
        Self::EnumerationFailed {
            message: message.into(),
        }
    }

    /// Creates a device-unavailable error.
    #[must_use]
    pub fn unavailable(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            id: id.into(),
            message: message.into(),
        }
    }
}
