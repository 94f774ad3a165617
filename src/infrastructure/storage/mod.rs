//! Captured picture storage adapters.

mod picture_writer;

pub use picture_writer::{PictureWriter, SavedPicture};
