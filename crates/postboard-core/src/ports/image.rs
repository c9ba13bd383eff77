//! Image encoding port.

use async_trait::async_trait;

use crate::domain::ImageSelection;

/// Turns a raw image selection into a self-contained `data:` URI carrying
/// both the media type and the base64 bytes.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(&self, selection: &ImageSelection) -> Result<String, EncodeError>;
}

/// Image encoding errors.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Image file is empty")]
    Empty,

    #[error("Image is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}
