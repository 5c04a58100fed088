//! Image Uploads
//!
//! Validated image payloads ready to post to the description endpoint.

use std::fs;
use std::path::Path;

use crate::DescribeError;

/// An image file to describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload, rejecting anything that is not `image/*`
    pub fn new(file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<Self, DescribeError> {
        if !is_image_mime(mime) {
            return Err(DescribeError::NotAnImage(mime.to_string()));
        }
        Ok(Self { file_name: file_name.to_string(), mime: mime.to_string(), bytes })
    }

    /// Read an image from disk, taking the MIME type from its extension
    pub fn from_path(path: &Path) -> Result<Self, DescribeError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime = mime_for_path(path);

        // Check the type before touching the file
        if !is_image_mime(mime) {
            return Err(DescribeError::NotAnImage(mime.to_string()));
        }

        let bytes = fs::read(path).map_err(|e| DescribeError::Io(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(file = %file_name, mime, size = bytes.len(), "read image");
        Self::new(&file_name, mime, bytes)
    }

    pub fn len(&self) -> usize { self.bytes.len() }
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }
}

/// Whether a MIME type names an image
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim()
        .split('/')
        .next()
        .is_some_and(|top| top.eq_ignore_ascii_case("image"))
        && mime.contains('/')
}

/// MIME type guessed from a file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
