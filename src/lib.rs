//! Waymark media - camera negotiation and thumbnail pipeline.
//!
//! This crate provides the media plumbing for a place-journal gallery with
//! clean architecture: camera stream-size negotiation, bounded in-memory
//! thumbnail caching, and asynchronous downsampled decoding.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing filesystem and decoding adapters.
pub mod infrastructure;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "waymark-media";
