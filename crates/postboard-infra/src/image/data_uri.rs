//! Data URI image encoder.
//!
//! Reads the selected file, works out its media type and produces
//! `data:<media type>;base64,<bytes>`, which can be stored in a post and
//! displayed as-is.

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mime::Mime;

use postboard_core::domain::ImageSelection;
use postboard_core::ports::{EncodeError, ImageEncoder};

/// Default upper bound on the raw file size.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Encodes image files as base64 data URIs.
#[derive(Debug, Clone)]
pub struct DataUriEncoder {
    max_bytes: u64,
}

impl DataUriEncoder {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl Default for DataUriEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

#[async_trait]
impl ImageEncoder for DataUriEncoder {
    async fn encode(&self, selection: &ImageSelection) -> Result<String, EncodeError> {
        let path = selection.path();

        let size = tokio::fs::metadata(path).await?.len();
        if size == 0 {
            return Err(EncodeError::Empty);
        }
        if size > self.max_bytes {
            return Err(EncodeError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await?;
        let media_type = sniff(&bytes)
            .or_else(|| from_extension(path))
            .ok_or_else(|| EncodeError::UnsupportedType(describe(path)))?;

        tracing::debug!(
            path = %path.display(),
            media_type = %media_type,
            bytes = bytes.len(),
            "Image encoded"
        );

        Ok(format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes)))
    }
}

/// Media type from the file's leading bytes.
fn sniff(bytes: &[u8]) -> Option<Mime> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(mime::IMAGE_PNG)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(mime::IMAGE_JPEG)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(mime::IMAGE_GIF)
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp".parse().ok()
    } else if bytes.starts_with(b"BM") {
        Some(mime::IMAGE_BMP)
    } else {
        None
    }
}

/// Media type from the file extension, for formats without a magic number.
fn from_extension(path: &Path) -> Option<Mime> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "svg" => Some(mime::IMAGE_SVG),
        "png" => Some(mime::IMAGE_PNG),
        "jpg" | "jpeg" => Some(mime::IMAGE_JPEG),
        "gif" => Some(mime::IMAGE_GIF),
        "bmp" => Some(mime::IMAGE_BMP),
        "webp" => "image/webp".parse().ok(),
        _ => None,
    }
}

fn describe(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use postboard_core::domain::DataUri;

    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn file_with(name: &str, bytes: &[u8]) -> (tempfile::TempDir, ImageSelection) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(bytes)
            .unwrap();
        (dir, ImageSelection::new(path))
    }

    #[tokio::test]
    async fn test_png_is_sniffed_regardless_of_extension() {
        let (_dir, selection) = file_with("picture.bin", PNG_HEADER);

        let uri = DataUriEncoder::default().encode(&selection).await.unwrap();
        let parsed = DataUri::parse(&uri).unwrap();

        assert_eq!(parsed.media_type, "image/png");
        assert_eq!(parsed.decoded_len(), PNG_HEADER.len());
        assert_eq!(STANDARD.decode(parsed.payload).unwrap(), PNG_HEADER);
    }

    #[tokio::test]
    async fn test_svg_uses_extension() {
        let (_dir, selection) = file_with("icon.SVG", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>");

        let uri = DataUriEncoder::default().encode(&selection).await.unwrap();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[tokio::test]
    async fn test_rejects_non_images() {
        let (_dir, selection) = file_with("notes.txt", b"just text");

        let err = DataUriEncoder::default().encode(&selection).await.unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedType(ext) if ext == ".txt"));
    }

    #[tokio::test]
    async fn test_rejects_empty_and_oversized_files() {
        let (_dir, empty) = file_with("empty.png", b"");
        assert!(matches!(
            DataUriEncoder::default().encode(&empty).await,
            Err(EncodeError::Empty)
        ));

        let (_dir, big) = file_with("big.png", PNG_HEADER);
        assert!(matches!(
            DataUriEncoder::new(4).encode(&big).await,
            Err(EncodeError::TooLarge { limit: 4, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let selection = ImageSelection::new("/definitely/not/here.png");
        assert!(matches!(
            DataUriEncoder::default().encode(&selection).await,
            Err(EncodeError::Io(_))
        ));
    }

    #[test]
    fn test_sniff_known_signatures() {
        assert_eq!(sniff(b"\xFF\xD8\xFF\xE0").unwrap(), mime::IMAGE_JPEG);
        assert_eq!(sniff(b"GIF89a....").unwrap(), mime::IMAGE_GIF);
        assert_eq!(sniff(b"RIFF\0\0\0\0WEBPVP8 ").unwrap().essence_str(), "image/webp");
        assert!(sniff(b"hello").is_none());
    }
}
