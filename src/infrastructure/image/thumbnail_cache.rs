//! Footprint-bounded LRU thumbnail cache implementation.

use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::{ThumbKey, Thumbnail};
use crate::domain::ports::ThumbnailStorePort;

/// Recency order plus the running footprint tally, guarded as one unit so
/// no caller ever observes an over-capacity or half-evicted cache.
struct CacheState {
    entries: LruCache<ThumbKey, Thumbnail>,
    resident_kib: u64,
}

/// Bounded in-memory store for decoded gallery thumbnails.
///
/// Capacity is accounted in KiB of decoded pixel data, not entry count, so a
/// handful of large photos cannot crowd out the budget unnoticed. Eviction is
/// least-recently-used. All operations are synchronous and memory-only;
/// `get` is called from the foreground on every visible slot while scrolling.
pub struct ThumbnailCache {
    state: Mutex<CacheState>,
    capacity_kib: NonZeroU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ThumbnailCache {
    /// Creates a cache bounded to `capacity_kib` of decoded data.
    ///
    /// The capacity is injected rather than derived here so small test
    /// capacities exercise eviction; zero is unrepresentable by type.
    #[must_use]
    pub fn new(capacity_kib: NonZeroU64) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::unbounded(),
                resident_kib: 0,
            }),
            capacity_kib,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Looks up a thumbnail without touching recency or the hit counters.
    pub fn peek(&self, key: &ThumbKey) -> Option<Arc<image::DynamicImage>> {
        let state = self.state.lock();
        state.entries.peek(key).map(Thumbnail::image)
    }

    /// True if a thumbnail is resident, without touching recency.
    pub fn contains(&self, key: &ThumbKey) -> bool {
        self.state.lock().entries.contains(key)
    }

    /// The configured capacity in KiB.
    #[must_use]
    pub const fn capacity_kib(&self) -> u64 {
        self.capacity_kib.get()
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let state = self.state.lock();
        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: state.entries.len(),
            resident_kib: state.resident_kib,
        }
    }
}

impl std::fmt::Debug for ThumbnailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailCache")
            .field("capacity_kib", &self.capacity_kib)
            .finish_non_exhaustive()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached thumbnails.
    pub entries: usize,
    /// Accounted KiB currently resident.
    pub resident_kib: u64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} thumbnails, {} KiB, {:.1}% hit rate ({} hits, {} misses)",
            self.entries, self.resident_kib, self.hit_rate, self.hits, self.misses
        )
    }
}

impl ThumbnailStorePort for ThumbnailCache {
    fn get(&self, key: &ThumbKey) -> Option<Arc<image::DynamicImage>> {
        let mut state = self.state.lock();
        if let Some(thumbnail) = state.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Thumbnail cache hit");
            Some(thumbnail.image())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Thumbnail cache miss");
            None
        }
    }

    fn put(&self, key: ThumbKey, thumbnail: Thumbnail) {
        let footprint = thumbnail.footprint_kib();
        let mut state = self.state.lock();

        debug!(key = %key, kib = footprint, "Storing thumbnail");
        if let Some(replaced) = state.entries.put(key, thumbnail) {
            state.resident_kib -= replaced.footprint_kib();
        }
        state.resident_kib += footprint;

        while state.resident_kib > self.capacity_kib.get() && state.entries.len() > 1 {
            if let Some((evicted_key, evicted)) = state.entries.pop_lru() {
                state.resident_kib -= evicted.footprint_kib();
                debug!(
                    key = %evicted_key,
                    kib = evicted.footprint_kib(),
                    "Evicted least-recently-used thumbnail"
                );
            }
        }
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        state.resident_kib = 0;
        debug!(dropped, "Cleared thumbnail cache");
    }

    fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    fn resident_kib(&self) -> u64 {
        self.state.lock().resident_kib
    }
}
