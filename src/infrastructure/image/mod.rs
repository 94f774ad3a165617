//! Image handling infrastructure.
//!
//! This module provides:
//! - Footprint-bounded memory caching with LRU eviction
//! - Downsampled thumbnail decoding
//! - The async decode pipeline feeding the gallery

pub mod decoder;
pub mod loader;
pub mod thumbnail_cache;

pub use decoder::decode_at_height;
pub use loader::{ThumbnailLoader, ThumbnailLoaderConfig, ThumbnailReadyEvent};
pub use thumbnail_cache::{CacheStats, ThumbnailCache};
