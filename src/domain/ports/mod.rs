mod camera_port;
mod thumbnail_store_port;

pub use camera_port::CameraPort;
pub use thumbnail_store_port::ThumbnailStorePort;
