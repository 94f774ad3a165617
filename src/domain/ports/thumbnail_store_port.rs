//! Thumbnail store port definition.

use std::sync::Arc;

use crate::domain::entities::{ThumbKey, Thumbnail};

/// Port for a bounded thumbnail store.
///
/// Every operation is synchronous and memory-only; nothing here may perform
/// decoding or blocking I/O, because the foreground consumer calls `get` on
/// every visible slot while scrolling.
pub trait ThumbnailStorePort: Send + Sync {
    /// Looks up a thumbnail, promoting it to most-recently-used on hit.
    fn get(&self, key: &ThumbKey) -> Option<Arc<image::DynamicImage>>;

    /// Inserts or replaces a thumbnail, then evicts until within capacity.
    fn put(&self, key: ThumbKey, thumbnail: Thumbnail);

    /// Evicts every entry unconditionally.
    fn clear(&self);

    /// Number of resident entries.
    fn len(&self) -> usize;

    /// True when nothing is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of accounted KiB across resident entries.
    fn resident_kib(&self) -> u64;
}
