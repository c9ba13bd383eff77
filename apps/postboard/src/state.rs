//! Application state - the board and the collaborators it was built with.

use std::sync::Arc;

use postboard_core::Board;
use postboard_core::ports::{ImageEncoder, KeyValueStore};
use postboard_infra::{DataUriEncoder, FileStore, InMemoryStore};

use crate::config::{AppConfig, StorageBackend};

/// Everything the session loop drives.
pub struct AppState {
    pub board: Board,
    pub encoder: Arc<dyn ImageEncoder>,
}

impl AppState {
    /// Build the application state with the configured store.
    ///
    /// A file store that cannot be opened falls back to memory so the
    /// application still starts; nothing will be kept after exit.
    pub fn new(config: &AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::File => match FileStore::open(&config.data_dir) {
                Ok(store) => {
                    let store = match config.store_quota {
                        Some(quota) => store.with_quota(quota),
                        None => store,
                    };
                    tracing::info!(dir = %config.data_dir.display(), "Using file store");
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::error!(
                        dir = %config.data_dir.display(),
                        error = %e,
                        "Failed to open file store. Using in-memory fallback."
                    );
                    Arc::new(InMemoryStore::new())
                }
            },
            StorageBackend::Memory => {
                tracing::info!("Using in-memory store");
                Arc::new(InMemoryStore::new())
            }
        };

        let board = Board::load(store, config.keys.clone());
        let encoder: Arc<dyn ImageEncoder> = Arc::new(DataUriEncoder::new(config.max_image_bytes));

        tracing::info!("Application state initialized");

        Self { board, encoder }
    }
}
