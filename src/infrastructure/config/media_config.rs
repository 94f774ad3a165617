//! Media pipeline configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

use crate::domain::services::CameraSelector;
use crate::infrastructure::image::ThumbnailLoaderConfig;

const APP_NAME: &str = "waymark";
const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "waymark";

/// Fraction of the host memory budget granted to the thumbnail cache.
const CACHE_BUDGET_FRACTION: u64 = 8;

/// Capacity used when neither an explicit figure nor a memory budget is
/// available.
const FALLBACK_CAPACITY_KIB: NonZeroU64 = NonZeroU64::new(65_536).unwrap();

const DEFAULT_DECODE_WORKERS: NonZeroUsize = NonZeroUsize::new(2).unwrap();

/// Thumbnail cache sizing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Explicit cache capacity in KiB. When absent the capacity derives
    /// from the host's memory budget. Zero is rejected at parse time.
    #[serde(default)]
    pub capacity_kib: Option<NonZeroU64>,
}

impl CacheSettings {
    /// Resolves the effective capacity.
    ///
    /// An explicit figure always wins; otherwise an eighth of the host's
    /// memory budget, and a fixed fallback when the host supplied none.
    #[must_use]
    pub fn effective_capacity(&self, memory_budget_kib: Option<u64>) -> NonZeroU64 {
        if let Some(capacity) = self.capacity_kib {
            return capacity;
        }
        let derived = memory_budget_kib.unwrap_or(0) / CACHE_BUDGET_FRACTION;
        NonZeroU64::new(derived).unwrap_or(FALLBACK_CAPACITY_KIB)
    }
}

/// Capture negotiation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Divisor applied to the viewport when qualifying preview sizes.
    #[serde(default = "default_preview_divisor")]
    pub preview_divisor: NonZeroU32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            preview_divisor: default_preview_divisor(),
        }
    }
}

/// Decode worker pool sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Maximum decodes running at once.
    #[serde(default = "default_decode_workers")]
    pub decode_workers: NonZeroUsize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            decode_workers: default_decode_workers(),
        }
    }
}

/// Captured picture storage locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory captured pictures are written to. When absent, a
    /// per-user data directory is used.
    #[serde(default)]
    pub pictures_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Resolves the directory captured pictures land in.
    #[must_use]
    pub fn effective_pictures_dir(&self) -> Option<PathBuf> {
        self.pictures_dir.clone().or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
                .map(|dirs| dirs.data_dir().join("pictures"))
        })
    }
}

/// Configuration for the whole media pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Thumbnail cache sizing.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Capture negotiation policy.
    #[serde(default)]
    pub camera: CameraSettings,

    /// Decode worker pool sizing.
    #[serde(default)]
    pub loader: LoaderSettings,

    /// Captured picture storage locations.
    #[serde(default)]
    pub storage: StorageSettings,
}

impl MediaConfig {
    /// Builds the negotiation policy this configuration describes.
    #[must_use]
    pub const fn selector(&self) -> CameraSelector {
        CameraSelector::new(self.camera.preview_divisor)
    }

    /// Builds the loader configuration this configuration describes.
    #[must_use]
    pub const fn loader_config(&self) -> ThumbnailLoaderConfig {
        ThumbnailLoaderConfig {
            decode_workers: self.loader.decode_workers.get(),
        }
    }
}

fn default_preview_divisor() -> NonZeroU32 {
    CameraSelector::DEFAULT_PREVIEW_DIVISOR
}

fn default_decode_workers() -> NonZeroUsize {
    DEFAULT_DECODE_WORKERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MediaConfig::default();

        assert_eq!(config.cache.capacity_kib, None);
        assert_eq!(config.camera.preview_divisor.get(), 2);
        assert_eq!(config.loader.decode_workers.get(), 2);
        assert_eq!(config.storage.pictures_dir, None);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            [cache]
            capacity_kib = 4096

            [camera]
            preview_divisor = 3
        "#;

        let config: MediaConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.cache.capacity_kib.map(NonZeroU64::get), Some(4096));
        assert_eq!(config.camera.preview_divisor.get(), 3);
        assert_eq!(config.loader.decode_workers.get(), 2);
    }

    #[test]
    fn test_zero_capacity_is_rejected_at_parse_time() {
        let toml_content = r#"
            [cache]
            capacity_kib = 0
        "#;

        assert!(toml::from_str::<MediaConfig>(toml_content).is_err());
    }

    #[test]
    fn test_zero_preview_divisor_is_rejected_at_parse_time() {
        let toml_content = r#"
            [camera]
            preview_divisor = 0
        "#;

        assert!(toml::from_str::<MediaConfig>(toml_content).is_err());
    }

    #[test]
    fn test_effective_capacity_prefers_explicit_value() {
        let config: MediaConfig = toml::from_str("[cache]\ncapacity_kib = 2048").unwrap();

        let capacity = config.cache.effective_capacity(Some(1_048_576));

        assert_eq!(capacity.get(), 2048);
    }

    #[test]
    fn test_effective_capacity_derives_an_eighth_of_the_budget() {
        let settings = CacheSettings::default();

        assert_eq!(settings.effective_capacity(Some(1_048_576)).get(), 131_072);
    }

    #[test]
    fn test_effective_capacity_falls_back_without_a_budget() {
        let settings = CacheSettings::default();

        assert_eq!(settings.effective_capacity(None), FALLBACK_CAPACITY_KIB);
        assert_eq!(settings.effective_capacity(Some(0)), FALLBACK_CAPACITY_KIB);
    }

    #[test]
    fn test_explicit_pictures_dir_wins() {
        let settings = StorageSettings {
            pictures_dir: Some(PathBuf::from("/tmp/pics")),
        };

        assert_eq!(
            settings.effective_pictures_dir(),
            Some(PathBuf::from("/tmp/pics"))
        );
    }
}
