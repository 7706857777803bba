//! Environment capability for loading and rasterizing images.
//!
//! The crop pipeline never touches a concrete image backend directly. It is
//! generic over an [`ImageCodec`], with two implementations:
//! - [`RasterCodec`] here, pure Rust on top of the `image` crate
//! - `CanvasCodec` in `photocrop-wasm`, backed by browser `<img>`/`<canvas>`
//!
//! Codec futures are not required to be `Send`; browser handles are bound
//! to the UI thread.

use std::path::Path;

use crate::config::PipelineConfig;
use crate::decode::{decode_image, DecodeError, DecodedImage, SourceRef};
use crate::export::{encode_region, EncodedImage, ExportError};
use crate::region::CropRegion;

/// A decoded bitmap with known pixel dimensions.
pub trait Bitmap {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl Bitmap for DecodedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Loads sources into bitmaps and rasterizes crop regions out of them.
#[allow(async_fn_in_trait)]
pub trait ImageCodec {
    /// Decoded handle produced by [`load`](ImageCodec::load).
    type Bitmap: Bitmap;

    /// Resolve and decode `source`.
    async fn load(
        &self,
        source: &SourceRef,
        config: &PipelineConfig,
    ) -> Result<Self::Bitmap, DecodeError>;

    /// Draw `region` of `bitmap` into a `width` x `height` surface and encode
    /// it as the export JPEG.
    ///
    /// `width`/`height` come from [`surface_size`](crate::export::surface_size)
    /// and are never zero.
    async fn rasterize(
        &self,
        bitmap: &Self::Bitmap,
        region: &CropRegion,
        width: u32,
        height: u32,
    ) -> Result<EncodedImage, ExportError>;
}

/// Pure-Rust codec for workers, servers and tests.
///
/// Resolves data URIs, `file://` URLs and local paths. Remote URLs are
/// rejected with `DecodeError::UnsupportedSource`; there is no HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec;

impl RasterCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decode already-fetched image bytes.
    pub fn load_bytes(&self, bytes: &[u8], config: &PipelineConfig) -> Result<DecodedImage, DecodeError> {
        decode_image(bytes, config.apply_orientation)
    }

    fn read_file(path: &Path) -> Result<Vec<u8>, DecodeError> {
        std::fs::read(path).map_err(|e| DecodeError::Io(format!("{}: {e}", path.display())))
    }
}

impl ImageCodec for RasterCodec {
    type Bitmap = DecodedImage;

    async fn load(
        &self,
        source: &SourceRef,
        config: &PipelineConfig,
    ) -> Result<DecodedImage, DecodeError> {
        match source {
            SourceRef::DataUri { bytes, .. } => self.load_bytes(bytes, config),
            SourceRef::File(path) => self.load_bytes(&Self::read_file(path)?, config),
            SourceRef::Url(url) => Err(DecodeError::UnsupportedSource(url.clone())),
        }
    }

    async fn rasterize(
        &self,
        bitmap: &DecodedImage,
        region: &CropRegion,
        width: u32,
        height: u32,
    ) -> Result<EncodedImage, ExportError> {
        encode_region(bitmap, region, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_url::to_data_url;
    use crate::export::encode_jpeg;
    use futures::executor::block_on;

    fn jpeg_source(width: u32, height: u32) -> SourceRef {
        let pixels = vec![100u8; (width * height * 3) as usize];
        let bytes = encode_jpeg(&pixels, width, height, 90).unwrap();
        SourceRef::parse(&to_data_url("image/jpeg", &bytes)).unwrap()
    }

    #[test]
    fn test_load_data_uri() {
        let codec = RasterCodec::new();
        let bitmap = block_on(codec.load(&jpeg_source(30, 20), &PipelineConfig::default())).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (30, 20));
    }

    #[test]
    fn test_load_remote_url_is_unsupported() {
        let codec = RasterCodec::new();
        let source = SourceRef::Url("https://example.com/me.jpg".to_string());
        let result = block_on(codec.load(&source, &PipelineConfig::default()));
        assert!(matches!(result, Err(DecodeError::UnsupportedSource(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let codec = RasterCodec::new();
        let source = SourceRef::File("/definitely/not/here.jpg".into());
        let result = block_on(codec.load(&source, &PipelineConfig::default()));
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_load_malformed_data_uri() {
        let codec = RasterCodec::new();
        let source = SourceRef::DataUri {
            mime: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0x00],
        };
        let result = block_on(codec.load(&source, &PipelineConfig::default()));
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_rasterize_through_codec() {
        let codec = RasterCodec::new();
        let bitmap = DecodedImage::filled(50, 40, [10, 200, 30]);
        let region = CropRegion::new(5.0, 5.0, 20.0, 10.0);
        let encoded = block_on(codec.rasterize(&bitmap, &region, 20, 10)).unwrap();
        assert_eq!((encoded.width, encoded.height), (20, 10));
        assert_eq!(&encoded.bytes[0..2], &[0xFF, 0xD8]);
    }
}
