//! Pipeline configuration.

pub mod media_config;
pub mod storage;

pub use media_config::{
    CacheSettings, CameraSettings, LoaderSettings, MediaConfig, StorageSettings,
};
pub use storage::{ConfigError, ConfigStore};
