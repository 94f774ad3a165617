//! Infrastructure layer with filesystem and decoding adapters.

/// Pipeline configuration.
pub mod config;
/// Image handling (thumbnail cache, decoding, async loading).
pub mod image;
/// Captured picture storage.
pub mod storage;

pub use config::{ConfigStore, MediaConfig};
pub use image::{
    CacheStats, ThumbnailCache, ThumbnailLoader, ThumbnailLoaderConfig, ThumbnailReadyEvent,
};
pub use storage::{PictureWriter, SavedPicture};
