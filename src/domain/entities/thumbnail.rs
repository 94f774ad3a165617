//! Cache key and decoded-thumbnail value types for the gallery pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stable identifier for a source image.
///
/// In Waymark every photo lives in a file, so the key wraps the file path.
/// Equality and hashing are value-based on the path, never on identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbKey(PathBuf);

impl ThumbKey {
    /// Creates a key from a source path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The source path this key identifies.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for ThumbKey {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for ThumbKey {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl fmt::Display for ThumbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A decoded image together with the KiB the cache accounts for it.
///
/// The pixel data is shared via `Arc` so a consumer can keep rendering a
/// thumbnail the cache has since evicted.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    image: Arc<image::DynamicImage>,
    footprint_kib: u64,
}

impl Thumbnail {
    /// Wraps a decoded image with an explicit footprint.
    ///
    /// Test fixtures use this to exercise eviction with round numbers.
    #[must_use]
    pub const fn new(image: Arc<image::DynamicImage>, footprint_kib: u64) -> Self {
        Self {
            image,
            footprint_kib,
        }
    }

    /// Wraps a decoded image, accounting its raw buffer size rounded up to
    /// whole KiB so no entry accounts zero.
    #[must_use]
    pub fn from_image(image: image::DynamicImage) -> Self {
        let footprint_kib = (image.as_bytes().len() as u64).div_ceil(1024);
        Self {
            image: Arc::new(image),
            footprint_kib,
        }
    }

    /// Shared handle to the pixel data.
    #[must_use]
    pub fn image(&self) -> Arc<image::DynamicImage> {
        Arc::clone(&self.image)
    }

    /// Accounted size in KiB.
    #[must_use]
    pub const fn footprint_kib(&self) -> u64 {
        self.footprint_kib
    }
}
