//! Decoding and saving generated images.
//!
//! The image service returns embedded image data as a `data:` URI
//! (`data:image/png;base64,...`). Posts in the feed may instead carry a remote
//! URL, which cannot be decoded locally and is fetched through
//! [`ApiClient::fetch_image`](crate::api::ApiClient::fetch_image).

use crate::domain::{ArtfeedError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::{Path, PathBuf};

/// File name used when saving without an explicit path.
pub const DEFAULT_FILE_NAME: &str = "ai_image.png";

/// Raw bytes of an embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// File extension matching the MIME type.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Decodes a base64 `data:` URI.
///
/// # Errors
///
/// Returns [`ArtfeedError::Decode`] for remote URLs, non-base64 data URIs, and
/// malformed payloads.
///
/// # Examples
///
/// ```
/// use artfeed::media::decode_data_uri;
///
/// let image = decode_data_uri("data:image/png;base64,aGVsbG8=")?;
/// assert_eq!(image.mime, "image/png");
/// assert_eq!(image.bytes, b"hello");
/// # Ok::<(), artfeed::ArtfeedError>(())
/// ```
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ArtfeedError::Decode("not a data URI".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ArtfeedError::Decode("data URI has no payload".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ArtfeedError::Decode("data URI is not base64 encoded".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ArtfeedError::Decode(format!("invalid base64 payload: {e}")))?;

    Ok(DecodedImage {
        mime: if mime.is_empty() { "image/png".to_string() } else { mime.to_string() },
        bytes,
    })
}

/// Decodes `uri` and writes the image to `target`.
///
/// A directory target receives [`DEFAULT_FILE_NAME`]. Returns the path written.
///
/// # Errors
///
/// Returns [`ArtfeedError::Decode`] if `uri` cannot be decoded and
/// [`ArtfeedError::Io`] if the file cannot be written.
pub fn save_image(uri: &str, target: &Path) -> Result<PathBuf> {
    let image = decode_data_uri(uri)?;
    write_image(&image, target, DEFAULT_FILE_NAME)
}

/// File name for a downloaded feed post, `download-<id>.<ext>`.
#[must_use]
pub fn post_file_name(post_id: &str, image: &DecodedImage) -> String {
    format!("download-{post_id}.{}", image.extension())
}

/// Writes `image` to `target`, or to `target/<file_name>` when `target` is a
/// directory. Returns the path written.
///
/// # Errors
///
/// Returns [`ArtfeedError::Io`] if the file cannot be written.
pub fn write_image(image: &DecodedImage, target: &Path, file_name: &str) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(file_name)
    } else {
        target.to_path_buf()
    };

    std::fs::write(&path, &image.bytes)?;
    tracing::debug!(path = %path.display(), bytes = image.bytes.len(), mime = %image.mime, "image saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_payload() {
        let image = decode_data_uri("data:image/jpeg;base64,AAEC").unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.bytes, vec![0, 1, 2]);
        assert_eq!(image.extension(), "jpg");
    }

    #[test]
    fn remote_urls_are_not_decodable() {
        let err = decode_data_uri("https://cdn.example.com/1.png").unwrap_err();
        assert!(matches!(err, ArtfeedError::Decode(_)));
    }

    #[test]
    fn rejects_non_base64_and_bad_payloads() {
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
    }

    #[test]
    fn saves_into_directory_with_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image("data:image/png;base64,aGVsbG8=", dir.path()).unwrap();

        assert_eq!(path, dir.path().join(DEFAULT_FILE_NAME));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn saves_to_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sunset.png");
        let path = save_image("data:image/png;base64,aGVsbG8=", &target).unwrap();
        assert_eq!(path, target);
        assert!(target.exists());
    }

    #[test]
    fn post_downloads_are_named_after_the_post() {
        let image = DecodedImage {
            mime: "image/jpeg".into(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(post_file_name("65a1", &image), "download-65a1.jpg");

        let dir = tempfile::tempdir().unwrap();
        let path = write_image(&image, dir.path(), &post_file_name("65a1", &image)).unwrap();
        assert_eq!(path, dir.path().join("download-65a1.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), [1, 2, 3]);
    }
}
