//! Use case implementations.

mod choose_camera_use_case;

pub use choose_camera_use_case::ChooseCameraUseCase;
