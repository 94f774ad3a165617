//! Async thumbnail decode orchestrator.
//!
//! Coalesces gallery decode work: one in-flight decode per source, results
//! landing in the cache and announced over an event channel.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, trace};

use crate::domain::entities::ThumbKey;
use crate::domain::errors::DecodeError;
use crate::domain::ports::ThumbnailStorePort;

use super::decoder;
use super::thumbnail_cache::ThumbnailCache;

/// Message sent when a thumbnail has landed in the cache.
///
/// The consumer re-fetches the key from the cache and refreshes only the
/// affected slot. Failed decodes send nothing: the slot keeps its
/// placeholder until some later request retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailReadyEvent {
    /// Key whose thumbnail is now resident.
    pub key: ThumbKey,
}

/// Configuration for the thumbnail loader.
#[derive(Debug, Clone)]
pub struct ThumbnailLoaderConfig {
    /// Maximum decodes running at once.
    pub decode_workers: usize,
}

impl Default for ThumbnailLoaderConfig {
    fn default() -> Self {
        Self { decode_workers: 2 }
    }
}

#[derive(Debug)]
enum DecodeCommand {
    Decode {
        key: ThumbKey,
        target_height: u32,
        generation: u64,
    },
    CancelAll,
}

/// Which keys have a decode in flight, and which request generation owns
/// each one.
///
/// A key is `Pending` exactly while present here; completions whose
/// generation no longer matches were superseded or invalidated by a clear
/// and must be discarded.
struct PendingDecodes {
    in_flight: HashMap<ThumbKey, u64>,
    next_generation: u64,
}

impl PendingDecodes {
    fn new() -> Self {
        Self {
            in_flight: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Registers a decode for `key` unless one is already in flight.
    fn begin(&mut self, key: &ThumbKey) -> Option<u64> {
        if self.in_flight.contains_key(key) {
            return None;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        self.in_flight.insert(key.clone(), generation);
        Some(generation)
    }

    /// Discharges a completed decode. Returns false when the completion was
    /// superseded or invalidated and its result must be discarded.
    fn finish(&mut self, key: &ThumbKey, generation: u64) -> bool {
        match self.in_flight.get(key) {
            Some(current) if *current == generation => {
                self.in_flight.remove(key);
                true
            }
            _ => false,
        }
    }

    fn contains(&self, key: &ThumbKey) -> bool {
        self.in_flight.contains_key(key)
    }

    fn len(&self) -> usize {
        self.in_flight.len()
    }

    fn clear(&mut self) {
        self.in_flight.clear();
    }
}

/// Orchestrates background thumbnail decodes for a scrolling gallery.
///
/// The foreground calls [`request`](Self::request) for every visible slot; a
/// bounded worker pool decodes misses off-thread and each success is
/// announced as a [`ThumbnailReadyEvent`]. Per key there is never more than
/// one decode in flight, however often the consumer re-requests it.
pub struct ThumbnailLoader {
    cache: Arc<ThumbnailCache>,
    pending: Arc<Mutex<PendingDecodes>>,
    request_tx: mpsc::UnboundedSender<DecodeCommand>,
    config: ThumbnailLoaderConfig,
}

impl std::fmt::Debug for ThumbnailLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State for the background worker loop.
struct WorkerState {
    cache: Arc<ThumbnailCache>,
    pending: Arc<Mutex<PendingDecodes>>,
    event_tx: mpsc::UnboundedSender<ThumbnailReadyEvent>,
    semaphore: Arc<Semaphore>,
    request_rx: mpsc::UnboundedReceiver<DecodeCommand>,
}

impl ThumbnailLoader {
    /// Creates a loader decoding into `cache` and announcing on `event_tx`.
    ///
    /// Spawns the worker loop onto the current Tokio runtime.
    #[must_use]
    pub fn new(
        config: ThumbnailLoaderConfig,
        event_tx: &mpsc::UnboundedSender<ThumbnailReadyEvent>,
        cache: Arc<ThumbnailCache>,
    ) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(config.decode_workers.max(1)));
        let pending = Arc::new(Mutex::new(PendingDecodes::new()));

        let worker_state = WorkerState {
            cache: cache.clone(),
            pending: pending.clone(),
            event_tx: event_tx.clone(),
            semaphore,
            request_rx,
        };

        tokio::spawn(Self::run_worker_loop(worker_state));

        Self {
            cache,
            pending,
            request_tx,
            config,
        }
    }

    /// Returns the cached thumbnail for `key`, or schedules a decode sized
    /// for `target_height` and returns `None` so the caller renders a
    /// placeholder.
    ///
    /// Never blocks and never decodes inline. Repeated calls while a decode
    /// is in flight keep returning `None` without scheduling more work.
    pub fn request(&self, key: &ThumbKey, target_height: u32) -> Option<Arc<image::DynamicImage>> {
        if let Some(image) = self.cache.get(key) {
            return Some(image);
        }

        let mut pending = self.pending.lock();
        // A completion may have landed between the miss above and taking
        // the lock; re-checking here keeps the one-decode-per-key rule.
        if let Some(image) = self.cache.get(key) {
            return Some(image);
        }
        let Some(generation) = pending.begin(key) else {
            trace!(key = %key, "Decode already pending");
            return None;
        };

        debug!(key = %key, target_height, generation, "Scheduling thumbnail decode");
        let command = DecodeCommand::Decode {
            key: key.clone(),
            target_height,
            generation,
        };
        if self.request_tx.send(command).is_err() {
            error!("Failed to send decode request: worker loop is gone");
            pending.finish(key, generation);
        }
        None
    }

    /// Invalidates every pending decode and evicts the cache.
    ///
    /// Called when the consuming view is torn down. Decodes already running
    /// are left to finish; their completions fail the generation check and
    /// are discarded instead of delivered.
    pub fn clear(&self) {
        let mut pending = self.pending.lock();
        let invalidated = pending.len();
        pending.clear();
        if self.request_tx.send(DecodeCommand::CancelAll).is_err() {
            error!("Failed to send cancel request: worker loop is gone");
        }
        self.cache.clear();
        if invalidated > 0 {
            debug!(invalidated, "Invalidated pending thumbnail decodes");
        }
    }

    /// True while a decode for `key` is in flight.
    #[must_use]
    pub fn is_pending(&self, key: &ThumbKey) -> bool {
        self.pending.lock().contains(key)
    }

    /// Number of decodes currently in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Worker loop handling decode commands and throttling.
    async fn run_worker_loop(mut state: WorkerState) {
        let mut queue: VecDeque<(ThumbKey, u32, u64)> = VecDeque::new();

        loop {
            tokio::select! {
                cmd = state.request_rx.recv() => {
                    match cmd {
                        Some(DecodeCommand::Decode { key, target_height, generation }) => {
                            queue.push_back((key, target_height, generation));
                        }
                        Some(DecodeCommand::CancelAll) => {
                            queue.clear();
                        }
                        None => break,
                    }
                }
                Ok(permit) = state.semaphore.clone().acquire_owned(), if !queue.is_empty() => {
                    if let Some((key, target_height, generation)) = queue.pop_front() {
                        let task = DecodeTask {
                            cache: state.cache.clone(),
                            pending: state.pending.clone(),
                            event_tx: state.event_tx.clone(),
                        };

                        tokio::spawn(async move {
                            task.run(key, target_height, generation).await;
                            drop(permit);
                        });
                    }
                }
            }
        }
    }
}

/// Context handed to one spawned decode.
struct DecodeTask {
    cache: Arc<ThumbnailCache>,
    pending: Arc<Mutex<PendingDecodes>>,
    event_tx: mpsc::UnboundedSender<ThumbnailReadyEvent>,
}

impl DecodeTask {
    async fn run(self, key: ThumbKey, target_height: u32, generation: u64) {
        let decode_key = key.clone();
        let result = tokio::task::spawn_blocking(move || {
            decoder::decode_at_height(decode_key.as_path(), target_height)
        })
        .await
        .unwrap_or_else(|e| Err(DecodeError::task_panicked(e.to_string())));

        match result {
            Ok(thumbnail) => {
                // Storing and discharging under one lock keeps a concurrent
                // request from seeing neither a cached image nor a pending
                // decode and scheduling a duplicate.
                let delivered = {
                    let mut pending = self.pending.lock();
                    if pending.finish(&key, generation) {
                        self.cache.put(key.clone(), thumbnail);
                        true
                    } else {
                        false
                    }
                };

                if delivered {
                    debug!(key = %key, "Thumbnail ready");
                    let _ = self.event_tx.send(ThumbnailReadyEvent { key });
                } else {
                    debug!(key = %key, generation, "Discarded invalidated decode result");
                }
            }
            Err(e) => {
                let was_current = self.pending.lock().finish(&key, generation);
                if was_current {
                    debug!(key = %key, error = %e, "Thumbnail decode failed, slot keeps its placeholder");
                }
            }
        }
    }
}
