//! Key-value store implementations - file-backed and in-memory.

mod memory;

#[cfg(feature = "file-store")]
mod file;

pub use memory::InMemoryStore;

#[cfg(feature = "file-store")]
pub use file::FileStore;
