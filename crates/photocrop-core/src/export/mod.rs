//! Crop rasterization and encoding.
//!
//! This module provides functionality for:
//! - Blitting a fractional pixel region into an off-screen RGB surface
//! - Encoding the surface as JPEG at the fixed export quality
//! - Pairing the encoded blob with its data URI
//!
//! # Examples
//!
//! ```ignore
//! use photocrop_core::export::{rasterize, ExportResult};
//! use photocrop_core::{CropRegion, PipelineConfig};
//!
//! let encoded = rasterize(&image, &CropRegion::new(100.0, 50.0, 200.0, 300.0), &PipelineConfig::default())?;
//! let result = ExportResult::from(encoded);
//! assert!(result.data_url.starts_with("data:image/jpeg;base64,"));
//! ```

mod jpeg;
mod rasterize;
mod types;

pub use jpeg::encode_jpeg;
pub use rasterize::{blit_region, encode_region, rasterize, surface_size};
pub use types::{EncodedImage, ExportError, ExportResult, EXPORT_JPEG_QUALITY, EXPORT_MIME};
