//! Domain entity definitions.

mod device;
mod size;
mod thumbnail;

pub use device::{CameraSelection, DeviceProfile, Facing, StreamCapabilities};
pub use size::Size;
pub use thumbnail::{ThumbKey, Thumbnail};
