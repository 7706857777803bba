//! Export result and error types.

use thiserror::Error;

use crate::data_url::to_data_url;

/// Media type of every export.
pub const EXPORT_MIME: &str = "image/jpeg";

/// Fixed JPEG quality for exports.
pub const EXPORT_JPEG_QUALITY: u8 = 92;

/// Errors that can occur while rasterizing and encoding a crop.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The region is degenerate or the surface too large; nothing to save.
    #[error("Export produced no data for a {width}x{height} region")]
    Empty { width: f64, height: f64 },

    /// The encoder failed.
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoded bytes straight out of a codec's rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
    /// Media type of `bytes`.
    pub mime: String,
    /// Pixel width of the encoded surface.
    pub width: u32,
    /// Pixel height of the encoded surface.
    pub height: u32,
}

/// A finished export: the blob and its data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Encoded image bytes.
    pub blob: Vec<u8>,
    /// `data:<mime>;base64,` form of `blob`.
    pub data_url: String,
    /// Pixel width of the exported image.
    pub width: u32,
    /// Pixel height of the exported image.
    pub height: u32,
}

impl From<EncodedImage> for ExportResult {
    fn from(encoded: EncodedImage) -> Self {
        let data_url = to_data_url(&encoded.mime, &encoded.bytes);
        Self {
            blob: encoded.bytes,
            data_url,
            width: encoded.width,
            height: encoded.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_result_from_encoded() {
        let result = ExportResult::from(EncodedImage {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            mime: EXPORT_MIME.to_string(),
            width: 1,
            height: 1,
        });
        assert_eq!(result.blob, vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(result.data_url, "data:image/jpeg;base64,/9j/2Q==");
    }

    #[test]
    fn test_empty_error_display() {
        let err = ExportError::Empty {
            width: 0.0,
            height: 10.0,
        };
        assert_eq!(err.to_string(), "Export produced no data for a 0x10 region");
    }
}
