//! Pixel dimensions for capture buffers, preview surfaces, and viewports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// A (width, height) pair in pixels.
///
/// Device size lists carry these in no particular order; negotiation sorts
/// them by [`area`](Self::area) as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count, widened to avoid overflow on large sensors.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The same size with width and height swapped.
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// True if this size is at least as large as `other` in both dimensions.
    #[must_use]
    pub const fn covers(&self, other: Self) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// True if this size covers `other` in either orientation.
    ///
    /// Sensors report sizes in sensor coordinates while viewports arrive in
    /// display coordinates, so a buffer that covers the rotated viewport is
    /// just as usable as one that covers it directly.
    #[must_use]
    pub const fn covers_rotated(&self, other: Self) -> bool {
        self.covers(other) || self.covers(other.transposed())
    }

    /// Both dimensions divided by `divisor`, truncating.
    #[must_use]
    pub fn scaled_down(&self, divisor: NonZeroU32) -> Self {
        Self {
            width: self.width / divisor.get(),
            height: self.height / divisor.get(),
        }
    }

    /// Converts to a `(width, height)` tuple.
    #[must_use]
    pub const fn to_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from(dimensions: (u32, u32)) -> Self {
        Self::new(dimensions.0, dimensions.1)
    }
}

impl From<Size> for (u32, u32) {
    fn from(size: Size) -> Self {
        size.to_tuple()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
