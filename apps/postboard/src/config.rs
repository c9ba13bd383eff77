//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use postboard_core::ports::StorageKeys;
use postboard_infra::DEFAULT_MAX_IMAGE_BYTES;

use crate::telemetry::TelemetryConfig;

/// Where the board keeps its posts and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub keys: StorageKeys,
    /// Largest value the file store accepts, if limited.
    pub store_quota: Option<usize>,
    pub max_image_bytes: u64,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage = match env::var("POSTBOARD_STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => StorageBackend::File,
        };

        let defaults = StorageKeys::default();
        let keys = StorageKeys {
            posts: env::var("POSTBOARD_POSTS_KEY").unwrap_or(defaults.posts),
            theme: env::var("POSTBOARD_THEME_KEY").unwrap_or(defaults.theme),
        };

        Self {
            storage,
            data_dir: env::var("POSTBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".postboard")),
            keys,
            store_quota: env::var("POSTBOARD_STORE_QUOTA_BYTES")
                .ok()
                .and_then(|s| s.parse().ok()),
            max_image_bytes: env::var("POSTBOARD_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}
