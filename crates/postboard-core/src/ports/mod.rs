//! Ports - trait definitions for collaborators supplied by the host.
//! These are the "interfaces" that infrastructure must implement.

mod confirm;
mod image;
mod storage;

pub use confirm::ConfirmPrompt;
pub use image::{EncodeError, ImageEncoder};
pub use storage::{KeyValueStore, StorageError, StorageKeys};
