//! Image encoder implementations.

mod data_uri;

pub use data_uri::{DEFAULT_MAX_IMAGE_BYTES, DataUriEncoder};
