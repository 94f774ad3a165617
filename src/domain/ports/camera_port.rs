//! Capture device enumeration port definition.

use async_trait::async_trait;

use crate::domain::entities::DeviceProfile;
use crate::domain::errors::CameraError;

/// Port for the platform camera service.
///
/// Implementations snapshot whatever the platform reports; they never filter
/// or reorder devices, since enumeration order is authoritative for
/// negotiation.
#[async_trait]
pub trait CameraPort: Send + Sync {
    /// Lists capture devices in platform enumeration order.
    async fn enumerate_devices(&self) -> Result<Vec<DeviceProfile>, CameraError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Mock camera port serving a fixed device list.
    pub struct MockCameraPort {
        devices: Mutex<Vec<DeviceProfile>>,
        should_fail: Mutex<bool>,
    }

    impl MockCameraPort {
        /// Creates a mock serving the given devices.
        pub fn new(devices: Vec<DeviceProfile>) -> Self {
            Self {
                devices: Mutex::new(devices),
                should_fail: Mutex::new(false),
            }
        }

        /// Creates a mock whose enumeration always fails.
        pub fn failing() -> Self {
            Self {
                devices: Mutex::new(Vec::new()),
                should_fail: Mutex::new(true),
            }
        }

        /// Replaces the served device list.
        pub fn set_devices(&self, devices: Vec<DeviceProfile>) {
            *self.devices.lock() = devices;
        }
    }

    #[async_trait]
    impl CameraPort for MockCameraPort {
        async fn enumerate_devices(&self) -> Result<Vec<DeviceProfile>, CameraError> {
            if *self.should_fail.lock() {
                Err(CameraError::enumeration("mock enumeration failure"))
            } else {
                Ok(self.devices.lock().clone())
            }
        }
    }
}
