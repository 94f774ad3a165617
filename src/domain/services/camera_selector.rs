//! Capture device and stream size negotiation.

use std::num::NonZeroU32;

use tracing::debug;

use crate::domain::entities::{CameraSelection, DeviceProfile, Facing, Size};

/// Picks the device and stream sizes a capture session should use.
///
/// Negotiation is a pure computation over the device snapshots it is handed:
/// no I/O, no mutable state, and identical inputs always produce identical
/// output. The first device in enumeration order that satisfies every check
/// wins; devices are never re-sorted against each other.
#[derive(Debug, Clone, Copy)]
pub struct CameraSelector {
    preview_divisor: NonZeroU32,
}

impl CameraSelector {
    /// Preview surfaces render smaller than full capture, so by default the
    /// preview stream only has to cover half the viewport per dimension.
    pub const DEFAULT_PREVIEW_DIVISOR: NonZeroU32 = NonZeroU32::new(2).unwrap();

    /// Creates a selector with the given preview viewport divisor.
    #[must_use]
    pub const fn new(preview_divisor: NonZeroU32) -> Self {
        Self { preview_divisor }
    }

    /// Chooses a device and its stream sizes for the given viewport.
    ///
    /// Returns `None` when no enumerated device passes every check; the
    /// caller is expected to fall back to a legacy capture path.
    #[must_use]
    pub fn choose(
        &self,
        devices: &[DeviceProfile],
        facing: Facing,
        viewport: Size,
    ) -> Option<CameraSelection> {
        devices
            .iter()
            .find_map(|device| self.qualify(device, facing, viewport))
    }

    /// Runs every check against one device, in order. Any missing datum
    /// disqualifies the device rather than being guessed around.
    fn qualify(
        &self,
        device: &DeviceProfile,
        facing: Facing,
        viewport: Size,
    ) -> Option<CameraSelection> {
        if device.facing != Some(facing) {
            debug!(device = %device.id, required = %facing, "Skipping device with wrong or unknown facing");
            return None;
        }

        let Some(capabilities) = device.capabilities.as_ref() else {
            debug!(device = %device.id, "Skipping device without stream capabilities");
            return None;
        };

        let Some(capture_size) = minimal_covering_size(&capabilities.capture_sizes, viewport)
        else {
            debug!(device = %device.id, viewport = %viewport, "No capture size covers the viewport");
            return None;
        };

        let preview_viewport = viewport.scaled_down(self.preview_divisor);
        let Some(preview_size) =
            minimal_covering_size(&capabilities.preview_sizes, preview_viewport)
        else {
            debug!(device = %device.id, viewport = %preview_viewport, "No preview size covers the preview viewport");
            return None;
        };

        let Some(sensor_rotation) = device.sensor_rotation else {
            debug!(device = %device.id, "Skipping device with unreadable sensor rotation");
            return None;
        };

        debug!(
            device = %device.id,
            capture = %capture_size,
            preview = %preview_size,
            rotation = sensor_rotation,
            "Selected capture device"
        );

        Some(CameraSelection {
            device_id: device.id.clone(),
            capture_size,
            preview_size,
            sensor_rotation,
        })
    }
}

impl Default for CameraSelector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREVIEW_DIVISOR)
    }
}

/// Smallest size by area that covers `required` in either orientation.
///
/// The sort is stable, so among equal-area candidates the one listed first by
/// the device wins.
fn minimal_covering_size(sizes: &[Size], required: Size) -> Option<Size> {
    let mut ordered = sizes.to_vec();
    ordered.sort_by_key(Size::area);
    ordered.into_iter().find(|size| size.covers_rotated(required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StreamCapabilities;

    fn back_device(id: &str) -> DeviceProfile {
        DeviceProfile::new(id)
            .with_facing(Facing::Back)
            .with_capabilities(StreamCapabilities::new(
                vec![Size::new(4000, 3000), Size::new(1920, 1080)],
                vec![Size::new(1280, 720)],
            ))
            .with_sensor_rotation(90)
    }

    #[test]
    fn test_chooses_smallest_qualifying_capture_size() {
        let devices = vec![
            DeviceProfile::new("front").with_facing(Facing::Front),
            back_device("back"),
        ];
        let selector = CameraSelector::default();

        let selection = selector
            .choose(&devices, Facing::Back, Size::new(1080, 1920))
            .unwrap();

        assert_eq!(selection.device_id, "back");
        assert_eq!(selection.capture_size, Size::new(1920, 1080));
        assert_eq!(selection.preview_size, Size::new(1280, 720));
        assert_eq!(selection.sensor_rotation, 90);
    }

    #[test]
    fn test_choose_is_deterministic() {
        let devices = vec![back_device("0"), back_device("1")];
        let selector = CameraSelector::default();
        let viewport = Size::new(1080, 1920);

        let first = selector.choose(&devices, Facing::Back, viewport);
        let second = selector.choose(&devices, Facing::Back, viewport);

        assert_eq!(first, second);
    }

    #[test]
    fn test_first_qualifying_device_wins() {
        let devices = vec![back_device("first"), back_device("second")];
        let selector = CameraSelector::default();

        let selection = selector
            .choose(&devices, Facing::Back, Size::new(1080, 1920))
            .unwrap();

        assert_eq!(selection.device_id, "first");
    }

    #[test]
    fn test_chosen_capture_area_is_minimal_among_qualifying() {
        let capture_sizes = vec![
            Size::new(4000, 3000),
            Size::new(2560, 1440),
            Size::new(1920, 1080),
            Size::new(640, 480),
        ];
        let device = DeviceProfile::new("0")
            .with_facing(Facing::Back)
            .with_capabilities(StreamCapabilities::new(
                capture_sizes.clone(),
                vec![Size::new(1280, 720)],
            ))
            .with_sensor_rotation(0);
        let viewport = Size::new(1080, 1920);

        let selection = CameraSelector::default()
            .choose(&[device], Facing::Back, viewport)
            .unwrap();

        for candidate in capture_sizes {
            if candidate.covers_rotated(viewport) {
                assert!(selection.capture_size.area() <= candidate.area());
            }
        }
    }

    #[test]
    fn test_equal_area_tie_resolves_to_first_listed() {
        let device = DeviceProfile::new("0")
            .with_facing(Facing::Back)
            .with_capabilities(StreamCapabilities::new(
                vec![Size::new(200, 100), Size::new(100, 200)],
                vec![Size::new(200, 100)],
            ))
            .with_sensor_rotation(0);

        let selection = CameraSelector::default()
            .choose(&[device], Facing::Back, Size::new(100, 100))
            .unwrap();

        assert_eq!(selection.capture_size, Size::new(200, 100));
    }

    #[test]
    fn test_unknown_facing_is_rejected() {
        let mut device = back_device("0");
        device.facing = None;

        let selection =
            CameraSelector::default().choose(&[device], Facing::Back, Size::new(100, 100));

        assert_eq!(selection, None);
    }

    #[test]
    fn test_missing_capabilities_reject_the_device() {
        let device = DeviceProfile::new("0")
            .with_facing(Facing::Back)
            .with_sensor_rotation(90);

        let selection =
            CameraSelector::default().choose(&[device], Facing::Back, Size::new(100, 100));

        assert_eq!(selection, None);
    }

    #[test]
    fn test_missing_rotation_rejects_the_device() {
        let mut device = back_device("0");
        device.sensor_rotation = None;

        let selection =
            CameraSelector::default().choose(&[device], Facing::Back, Size::new(1080, 1920));

        assert_eq!(selection, None);
    }

    #[test]
    fn test_rejected_device_falls_through_to_next() {
        let mut broken = back_device("broken");
        broken.sensor_rotation = None;
        let devices = vec![broken, back_device("working")];

        let selection = CameraSelector::default()
            .choose(&devices, Facing::Back, Size::new(1080, 1920))
            .unwrap();

        assert_eq!(selection.device_id, "working");
    }

    #[test]
    fn test_no_covering_capture_size_rejects_the_device() {
        let device = DeviceProfile::new("0")
            .with_facing(Facing::Back)
            .with_capabilities(StreamCapabilities::new(
                vec![Size::new(640, 480)],
                vec![Size::new(1280, 720)],
            ))
            .with_sensor_rotation(0);

        let selection =
            CameraSelector::default().choose(&[device], Facing::Back, Size::new(1080, 1920));

        assert_eq!(selection, None);
    }

    #[test]
    fn test_preview_divisor_is_policy() {
        let devices = vec![back_device("0")];
        let viewport = Size::new(1080, 1920);

        let halved = CameraSelector::default().choose(&devices, Facing::Back, viewport);
        assert!(halved.is_some());

        // With no viewport reduction the 1280x720 preview stream is too small.
        let full = CameraSelector::new(NonZeroU32::new(1).unwrap());
        assert_eq!(full.choose(&devices, Facing::Back, viewport), None);
    }

    #[test]
    fn test_empty_device_list_finds_nothing() {
        let selection = CameraSelector::default().choose(&[], Facing::Back, Size::new(100, 100));
        assert_eq!(selection, None);
    }
}
