//! Pure domain services.

mod camera_selector;
pub mod downsample;

pub use camera_selector::CameraSelector;
