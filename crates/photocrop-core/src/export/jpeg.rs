//! JPEG encoding for crop exports.
//!
//! The `image` crate's baseline encoder is deterministic: the same pixels
//! and quality always give the same bytes, with no timestamps or other
//! metadata embedded.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::ExportError;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// Returns `ExportError::EncodingFailed` if the buffer does not match the
/// dimensions or the encoder rejects the input.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EncodingFailed(format!(
            "invalid dimensions {width}x{height}"
        )));
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(ExportError::EncodingFailed(format!(
            "expected {expected_len} bytes of pixel data, got {}",
            pixels.len()
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_markers() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg = encode_jpeg(&pixels, 100, 100, 92).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_single_pixel() {
        let jpeg = encode_jpeg(&[255, 0, 0], 1, 1, 92).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 10, 92),
            Err(ExportError::EncodingFailed(_))
        ));
        assert!(matches!(
            encode_jpeg(&[], 10, 0, 92),
            Err(ExportError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_encode_jpeg_buffer_mismatch() {
        let pixels = vec![128u8; 99 * 100 * 3];
        assert!(encode_jpeg(&pixels, 100, 100, 92).is_err());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: identical input gives identical bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=24, 1u32..=24),
            seed in any::<u8>(),
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels: Vec<u8> = (0..size).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();

            let first = encode_jpeg(&pixels, width, height, 92).unwrap();
            let second = encode_jpeg(&pixels, width, height, 92).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
