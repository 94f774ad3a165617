//! Domain error types.

mod camera_error;
mod decode_error;
mod storage_error;

pub use camera_error::CameraError;
pub use decode_error::DecodeError;
pub use storage_error::StorageError;
