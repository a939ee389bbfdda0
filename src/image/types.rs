//! Core image types.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Content type assumed when the server sends none.
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Maps a `Content-Type` value (parameters ignored) to a format.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// An input image downloaded for editing.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// `Content-Type` reported by the server.
    pub content_type: String,
}

impl FetchedImage {
    /// Wraps downloaded bytes and their content type.
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }

    /// Best guess at the format: magic bytes first, then the content type.
    pub fn format(&self) -> ImageFormat {
        ImageFormat::from_magic_bytes(&self.data)
            .or_else(|| ImageFormat::from_mime(&self.content_type))
            .unwrap_or_default()
    }

    /// File name used for the multipart `image` part.
    pub fn file_name(&self) -> String {
        format!("image.{}", self.format().extension())
    }

    /// Size in kilobytes, for log lines.
    pub fn size_kb(&self) -> f64 {
        self.data.len() as f64 / 1024.0
    }
}

/// The decoded result of an edit, already written to disk.
#[derive(Debug, Clone)]
#[must_use = "edited image carries the output path and metadata"]
pub struct EditedImage {
    /// Decoded image bytes.
    pub data: Vec<u8>,
    /// Format detected from the decoded bytes (PNG if unknown).
    pub format: ImageFormat,
    /// Where the bytes were written.
    pub path: PathBuf,
    /// Model that produced the edit.
    pub model: String,
    /// Round-trip time of the edit request in milliseconds.
    pub duration_ms: u64,
}

impl EditedImage {
    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Writes `data` to `path`, replacing any existing file.
pub(crate) fn save(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"short"), None);
    }

    #[test]
    fn test_format_from_mime() {
        assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::from_mime("image/jpeg; charset=binary"),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_mime("IMAGE/WEBP"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_mime("text/html"), None);
    }

    #[test]
    fn test_fetched_image_file_name() {
        let png = FetchedImage::new(PNG_MAGIC.to_vec(), "application/octet-stream");
        assert_eq!(png.file_name(), "image.png");

        let jpeg = FetchedImage::new(vec![1, 2, 3], "image/jpeg");
        assert_eq!(jpeg.file_name(), "image.jpg");

        let unknown = FetchedImage::new(vec![1, 2, 3], "text/plain");
        assert_eq!(unknown.format(), ImageFormat::Png);
    }

    #[test]
    fn test_size_kb() {
        let image = FetchedImage::new(vec![0; 2048], DEFAULT_CONTENT_TYPE);
        assert_eq!(image.size_kb(), 2.0);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        save(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
