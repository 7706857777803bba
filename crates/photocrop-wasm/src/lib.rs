//! Photocrop WASM - WebAssembly bindings for the crop export pipeline
//!
//! This crate exposes photocrop-core to the profile-photo dialog.
//!
//! # Module Structure
//!
//! - `types` - JS wrapper for export results, region conversion
//! - `export` - synchronous export from in-memory bytes (workers)
//! - `canvas` - browser `<img>`/`<canvas>` codec and async export (wasm32 only)
//!
//! # Usage
//!
//! ```typescript
//! import init, { export_crop, centered_aspect_region } from '@photocrop/wasm';
//!
//! await init();
//!
//! const crop = centered_aspect_region(img.naturalWidth, img.naturalHeight, 1);
//! const result = await export_crop(img.src, crop);
//! avatar.src = result.data_url;
//! ```

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod canvas;
mod export;
mod types;

#[cfg(target_arch = "wasm32")]
pub use canvas::{export_crop, CanvasBitmap, CanvasCodec};
pub use export::{centered_aspect_region, export_crop_bytes};
pub use types::JsExportResult;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
