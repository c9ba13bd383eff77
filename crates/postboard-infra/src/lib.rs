//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`:
//! key-value stores and the image encoder.
//!
//! ## Feature Flags
//!
//! - `file-store` (default) - persistent one-file-per-key store

pub mod image;
pub mod storage;

pub use image::{DEFAULT_MAX_IMAGE_BYTES, DataUriEncoder};
pub use storage::InMemoryStore;

#[cfg(feature = "file-store")]
pub use storage::FileStore;
