//! Camera selection use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{CameraSelection, Facing, Size};
use crate::domain::ports::CameraPort;
use crate::domain::services::CameraSelector;

/// Enumerates capture devices and negotiates stream sizes for one of them.
///
/// Enumeration failure is absorbed here: the capture surface only ever sees
/// "selection or nothing" and falls back to its legacy path on nothing, the
/// same as when no device qualifies.
#[derive(Clone)]
pub struct ChooseCameraUseCase {
    camera_port: Arc<dyn CameraPort>,
    selector: CameraSelector,
}

impl ChooseCameraUseCase {
    /// Creates the use case over an enumeration port and a selection policy.
    #[must_use]
    pub const fn new(camera_port: Arc<dyn CameraPort>, selector: CameraSelector) -> Self {
        Self {
            camera_port,
            selector,
        }
    }

    /// Picks a device facing `facing` whose streams can fill `viewport`.
    pub async fn execute(&self, facing: Facing, viewport: Size) -> Option<CameraSelection> {
        debug!(facing = %facing, viewport = %viewport, "Negotiating capture device");

        let devices = match self.camera_port.enumerate_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "Device enumeration failed, falling back");
                return None;
            }
        };

        let selection = self.selector.choose(&devices, facing, viewport);

        match &selection {
            Some(found) => info!(
                device = %found.device_id,
                capture = %found.capture_size,
                preview = %found.preview_size,
                "Capture device negotiated"
            ),
            None => debug!(examined = devices.len(), "No capture device qualified"),
        }

        selection
    }
}
