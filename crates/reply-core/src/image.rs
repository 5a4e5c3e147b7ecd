//! Chat screenshot payloads.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Fallback MIME type when nothing better is known.
const DEFAULT_MIME_TYPE: &str = "image/png";

/// Errors that can occur while loading an image payload.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The file could not be read.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// The string is not a `data:<mime>;base64,<data>` URL.
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The base64 body could not be decoded.
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A binary-encoded image plus its MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

// Keep image bytes out of logs.
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl ImagePayload {
    /// Wrap raw image bytes.
    pub fn from_bytes(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read an image file, guessing the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mime_type = mime_guess::from_path(path)
            .first()
            .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        Ok(Self { mime_type, data })
    }

    /// Parse a `data:image/png;base64,...` URL as produced by browser file readers.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::InvalidDataUrl("missing data: prefix".to_string()))?;

        let (header, body) = rest
            .split_once(',')
            .ok_or_else(|| ImageError::InvalidDataUrl("missing comma".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ImageError::InvalidDataUrl("only base64 data URLs are supported".to_string()))?;

        let mime_type = if mime_type.is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        };

        let data = STANDARD.decode(body)?;
        Ok(Self::from_bytes(mime_type, data))
    }

    /// Base64 encoding of the image bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Whether there are any bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}
