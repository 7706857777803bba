//! Photocrop Core - crop-and-export pipeline for profile photos
//!
//! This crate loads a source image, cuts a pixel rectangle out of it and
//! exports the result as a JPEG blob plus its base64 data URI.
//!
//! # Module Structure
//!
//! - `decode` - source parsing and bitmap decoding
//! - `export` - rasterization and JPEG encoding
//! - `codec` - the environment capability the pipeline runs on
//! - `pipeline` - the decode → rasterize flow
//!
//! # Usage
//!
//! ```ignore
//! use photocrop_core::{CropPipeline, CropRegion, RasterCodec};
//!
//! let pipeline = CropPipeline::new(RasterCodec::new());
//! let result = pipeline
//!     .export_str("file:///photos/me.jpg", &CropRegion::new(100.0, 50.0, 200.0, 300.0))
//!     .await?;
//! upload(&result.blob);
//! ```

pub mod codec;
pub mod config;
pub mod data_url;
pub mod decode;
pub mod export;
pub mod pipeline;
pub mod region;

pub use codec::{Bitmap, ImageCodec, RasterCodec};
pub use config::PipelineConfig;
pub use data_url::{parse_data_url, to_data_url};
pub use decode::{DecodeError, DecodedImage, SourceRef};
pub use export::{ExportError, ExportResult, EXPORT_JPEG_QUALITY};
pub use pipeline::{CropPipeline, DialogGuard, PipelineError};
pub use region::CropRegion;
