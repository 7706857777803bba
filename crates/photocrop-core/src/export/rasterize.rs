//! Off-screen rasterization of a crop region.
//!
//! The source rectangle `[x, y, width, height]` is mapped onto a surface of
//! `floor(width) x floor(height)` pixels with a single nearest-neighbour
//! blit. Destination pixel `(i, j)` samples the source at its center:
//!
//! ```text
//! src_x = floor(x + (i + 0.5) * width / W)
//! src_y = floor(y + (j + 0.5) * height / H)
//! ```
//!
//! For whole-pixel regions this is an exact copy. Samples that fall outside
//! the source are black, which is what a transparent canvas turns into once
//! flattened to JPEG.

use crate::config::PipelineConfig;
use crate::decode::DecodedImage;
use crate::region::CropRegion;

use super::jpeg::encode_jpeg;
use super::{EncodedImage, ExportError, EXPORT_JPEG_QUALITY, EXPORT_MIME};

/// Copy `region` of `image` into a new `width` x `height` RGB surface.
///
/// `width` and `height` must be non-zero; use [`CropRegion::output_size`].
pub fn blit_region(image: &DecodedImage, region: &CropRegion, width: u32, height: u32) -> Vec<u8> {
    let src_w = image.width as usize;
    let dst_w = width as usize;
    let mut output = vec![0u8; dst_w * height as usize * 3];

    let columns: Vec<Option<usize>> = (0..width)
        .map(|i| sample_index(region.x, region.width, width, i, image.width))
        .collect();

    for j in 0..height {
        let Some(src_y) = sample_index(region.y, region.height, height, j, image.height) else {
            continue;
        };
        let src_row = src_y * src_w * 3;
        let dst_row = j as usize * dst_w * 3;

        for (i, src_x) in columns.iter().enumerate() {
            let Some(src_x) = src_x else { continue };
            let src_idx = src_row + src_x * 3;
            // A buffer shorter than width * height leaves the rest black
            if let Some(rgb) = image.pixels.get(src_idx..src_idx + 3) {
                let dst_idx = dst_row + i * 3;
                output[dst_idx..dst_idx + 3].copy_from_slice(rgb);
            }
        }
    }

    output
}

/// Surface size for `region`, or `ExportError::Empty`.
///
/// Degenerate regions and surfaces above `config.max_surface_pixels` are
/// rejected here, before anything is allocated or encoded.
pub fn surface_size(region: &CropRegion, config: &PipelineConfig) -> Result<(u32, u32), ExportError> {
    let empty = || ExportError::Empty {
        width: region.width,
        height: region.height,
    };

    let (width, height) = region.output_size().ok_or_else(empty)?;
    if !config.allows_surface(width, height) {
        return Err(empty());
    }
    Ok((width, height))
}

/// Blit `region` into a `width` x `height` surface and encode it.
pub fn encode_region(
    image: &DecodedImage,
    region: &CropRegion,
    width: u32,
    height: u32,
) -> Result<EncodedImage, ExportError> {
    let surface = blit_region(image, region, width, height);
    let bytes = encode_jpeg(&surface, width, height, EXPORT_JPEG_QUALITY)?;
    if bytes.is_empty() {
        return Err(ExportError::Empty {
            width: region.width,
            height: region.height,
        });
    }

    Ok(EncodedImage {
        bytes,
        mime: EXPORT_MIME.to_string(),
        width,
        height,
    })
}

/// Rasterize `region` of `image` and encode it as the export JPEG.
///
/// # Errors
///
/// Returns `ExportError::Empty` when [`surface_size`] rejects the region.
pub fn rasterize(
    image: &DecodedImage,
    region: &CropRegion,
    config: &PipelineConfig,
) -> Result<EncodedImage, ExportError> {
    let (width, height) = surface_size(region, config)?;
    encode_region(image, region, width, height)
}

/// Source index sampled by destination index `i`, or `None` when outside.
#[inline]
fn sample_index(origin: f64, extent: f64, out: u32, i: u32, limit: u32) -> Option<usize> {
    let pos = (origin + (i as f64 + 0.5) * extent / out as f64).floor();
    (pos >= 0.0 && pos < limit as f64).then_some(pos as usize)
}
