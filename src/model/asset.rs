//! Image intake: uploaded bytes to document-embeddable data URIs.

use crate::error::{Error, Result};
use base64::Engine;
use std::path::Path;

/// An uploaded image, held as raw bytes plus its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Raw binary data
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/jpeg")
    pub mime_type: String,

    /// Original filename if known
    pub filename: Option<String>,
}

impl ImageAsset {
    /// Wrap bytes with a declared media type.
    ///
    /// The only intake rule is that the media type must be `image/*`.
    pub fn from_bytes(data: Vec<u8>, mime_type: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        if !mime_type.to_ascii_lowercase().starts_with("image/") {
            return Err(Error::InvalidImage(format!(
                "expected an image media type, got '{}'",
                mime_type
            )));
        }
        Ok(Self {
            data,
            mime_type,
            filename: None,
        })
    }

    /// Wrap bytes, detecting the media type from magic bytes.
    pub fn from_bytes_detect(data: Vec<u8>) -> Result<Self> {
        let mime_type = detect_mime_type(&data)
            .ok_or_else(|| Error::InvalidImage("unrecognized image data".to_string()))?;
        Self::from_bytes(data, mime_type)
    }

    /// Read an image file, detecting its media type from content.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut asset = Self::from_bytes_detect(data)?;
        asset.filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(asset)
    }

    /// Size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encode as an inline `data:` URI.
    pub fn to_data_uri(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime_type, payload)
    }
}

/// Detect an image MIME type from data magic bytes.
pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.len() < 4 {
        return None;
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // WEBP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    // BMP: BM
    if data.starts_with(b"BM") {
        return Some("image/bmp");
    }

    // SVG is text; look for the root element near the start
    let head = String::from_utf8_lossy(&data[..data.len().min(512)]);
    if head.contains("<svg") {
        return Some("image/svg+xml");
    }

    None
}

/// Split a `data:` URI into media type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime_type = meta.strip_suffix(";base64")?;
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some((mime_type.to_string(), data))
}
