//! Image loading for the crop pipeline.
//!
//! This module provides functionality for:
//! - Parsing image source references (data URIs, file URLs, remote URLs)
//! - Decoding JPEG and PNG bitmaps into RGB pixels
//! - Applying EXIF orientation so pixel space matches what the user sees
//!
//! # Examples
//!
//! ```ignore
//! use photocrop_core::decode::{decode_image, SourceRef};
//!
//! let source = SourceRef::parse("data:image/png;base64,...")?;
//! if let SourceRef::DataUri { bytes, .. } = source {
//!     let image = decode_image(&bytes, true)?;
//!     println!("Decoded {}x{} image", image.width, image.height);
//! }
//! ```

mod bitmap;
mod source;
mod types;

pub use bitmap::decode_image;
pub use source::SourceRef;
pub use types::{DecodeError, DecodedImage, Orientation};
