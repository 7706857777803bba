//! Bitmap decoding with EXIF orientation handling.
//!
//! Browsers display `<img>` content in its EXIF orientation, so crop regions
//! coming from the selector are expressed in oriented pixel space. The
//! decoder applies the same correction before handing the bitmap out.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image (JPEG or PNG, sniffed from content) into RGB pixels.
///
/// When `orient` is set, the EXIF orientation tag is honored.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes are not a decodable image.
pub fn decode_image(bytes: &[u8], orient: bool) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::CorruptedFile("empty image data".to_string()));
    }

    let orientation = if orient {
        extract_orientation(bytes)
    } else {
        Orientation::Normal
    };

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Read the EXIF orientation tag, defaulting to `Orientation::Normal`.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
