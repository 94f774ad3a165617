//! Blocking thumbnail decode routine.
//!
//! Runs the original capture file through a bounds probe, the decimation
//! factor, and a full decode. Blocking file I/O lives here and only here;
//! callers dispatch this through `spawn_blocking`.

use std::path::Path;

use tracing::trace;

use crate::domain::entities::Thumbnail;
use crate::domain::errors::DecodeError;
use crate::domain::services::downsample;

/// Decodes the image at `path`, decimated for a slot `target_height` pixels
/// tall.
///
/// The header is read first so the decimation factor is known before any
/// pixel data is touched; sources no taller than the target decode at full
/// resolution.
///
/// # Errors
///
/// Returns [`DecodeError`] when the file is missing, unreadable or not a
/// decodable image.
pub fn decode_at_height(path: &Path, target_height: u32) -> Result<Thumbnail, DecodeError> {
    let (source_width, source_height) = image::image_dimensions(path)?;
    let factor = downsample::sample_factor(source_height, target_height);
    trace!(
        path = %path.display(),
        source_height,
        target_height,
        factor,
        "Decoding thumbnail"
    );

    let decoded = image::open(path)?;
    let decoded = if factor > 1 {
        let (width, height) = downsample::scaled_dimensions(source_width, source_height, factor);
        decoded.thumbnail_exact(width, height)
    } else {
        decoded
    };

    Ok(Thumbnail::from_image(decoded))
}
