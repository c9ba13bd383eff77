//! File-backed key-value store.
//!
//! Each key lives in its own `<key>.value` file under the data directory.
//! Values are stored verbatim; the store does not care whether they are JSON.
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use postboard_core::ports::{KeyValueStore, StorageError};

const VALUE_EXTENSION: &str = "value";

/// Persistent store rooted at a directory.
pub struct FileStore {
    dir: PathBuf,
    /// Largest value accepted by `save`, in bytes.
    quota: Option<usize>,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) a store in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        tracing::debug!(dir = %dir.display(), "File store opened");

        Ok(Self {
            dir,
            quota: None,
            write_lock: Mutex::new(()),
        })
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("write lock poisoned".to_string()))?;

        let tmp = path.with_extension(format!("{VALUE_EXTENSION}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        tracing::trace!(key = %key, bytes = value.len(), "Value written");
        Ok(())
    }
}
