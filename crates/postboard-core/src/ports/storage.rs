//! Key-value persistence port - the local-storage analogue.

/// String-keyed, string-valued store. Reads and writes are synchronous.
///
/// Serialization is the caller's job; implementations only move strings.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys under which the board keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub posts: String,
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            posts: "posts".to_string(),
            theme: "theme".to_string(),
        }
    }
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    #[error("Quota exceeded: {size} bytes over limit {limit}")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
