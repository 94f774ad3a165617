//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{
    CameraSelection, DeviceProfile, Facing, Size, StreamCapabilities, ThumbKey, Thumbnail,
};
pub use errors::{CameraError, DecodeError, StorageError};
pub use ports::{CameraPort, ThumbnailStorePort};
pub use services::CameraSelector;
