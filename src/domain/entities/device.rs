//! Capture device descriptions as reported by the platform camera service.

use super::size::Size;
use std::fmt;

/// Physical direction a capture device points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Points toward the user (selfie camera).
    Front,
    /// Points away from the user.
    Back,
    /// Externally attached device (USB camera, etc).
    External,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
            Self::External => write!(f, "external"),
        }
    }
}

/// Per-device enumeration of supported output sizes, one list per output
/// purpose.
///
/// Absence of the whole structure means the platform failed to enumerate
/// stream configurations for the device, which disqualifies it from
/// negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamCapabilities {
    /// Sizes available for full-resolution still capture, unordered.
    pub capture_sizes: Vec<Size>,
    /// Sizes available for the live preview stream, unordered.
    pub preview_sizes: Vec<Size>,
}

impl StreamCapabilities {
    /// Creates a capability map from the two size lists.
    #[must_use]
    pub const fn new(capture_sizes: Vec<Size>, preview_sizes: Vec<Size>) -> Self {
        Self {
            capture_sizes,
            preview_sizes,
        }
    }
}

/// Immutable snapshot of one capture device, taken once per negotiation.
///
/// Fields that the platform could not read are `None`; negotiation treats any
/// missing datum as disqualifying rather than guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Platform identifier for the device.
    pub id: String,
    /// Which way the device faces, if readable.
    pub facing: Option<Facing>,
    /// Supported output sizes, if enumeration succeeded.
    pub capabilities: Option<StreamCapabilities>,
    /// Sensor mounting rotation in degrees (0, 90, 180 or 270), if readable.
    pub sensor_rotation: Option<u32>,
}

impl DeviceProfile {
    /// Creates a profile with everything unreadable except the identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            facing: None,
            capabilities: None,
            sensor_rotation: None,
        }
    }

    /// Sets the facing.
    #[must_use]
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = Some(facing);
        self
    }

    /// Sets the capability map.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: StreamCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Sets the sensor rotation.
    #[must_use]
    pub fn with_sensor_rotation(mut self, degrees: u32) -> Self {
        self.sensor_rotation = Some(degrees);
        self
    }
}

/// Outcome of size negotiation: the device to open and the sizes to configure
/// its streams with.
///
/// Transient value handed to the capture surface; it holds no resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraSelection {
    /// Identifier of the selected device.
    pub device_id: String,
    /// Size for the still-capture stream.
    pub capture_size: Size,
    /// Size for the preview stream.
    pub preview_size: Size,
    /// Sensor mounting rotation in degrees.
    pub sensor_rotation: u32,
}

impl CameraSelection {
    /// Clockwise rotation the preview surface must apply so the stream
    /// appears upright, given the current display rotation in degrees.
    #[must_use]
    pub const fn display_orientation(&self, display_rotation: u32) -> u32 {
        (self.sensor_rotation + 360 - display_rotation % 360) % 360
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder_defaults_to_unreadable() {
        let profile = DeviceProfile::new("0");
        assert_eq!(profile.facing, None);
        assert_eq!(profile.capabilities, None);
        assert_eq!(profile.sensor_rotation, None);
    }

    #[test]
    fn test_display_orientation_compensates_for_display_rotation() {
        let selection = CameraSelection {
            device_id: "0".to_string(),
            capture_size: Size::new(1920, 1080),
            preview_size: Size::new(1280, 720),
            sensor_rotation: 90,
        };

        assert_eq!(selection.display_orientation(0), 90);
        assert_eq!(selection.display_orientation(90), 0);
        assert_eq!(selection.display_orientation(180), 270);
        assert_eq!(selection.display_orientation(270), 180);
    }

    #[test]
    fn test_facing_display() {
        assert_eq!(Facing::Front.to_string(), "front");
        assert_eq!(Facing::Back.to_string(), "back");
    }
}
