//! WASM-compatible wrapper types for crop exports.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! photocrop types, handling conversion between Rust and JavaScript values.

use photocrop_core::{CropRegion, ExportResult};
use wasm_bindgen::prelude::*;

/// A finished crop export for JavaScript.
///
/// # Memory Management
///
/// The blob lives in WASM memory. `blob()` copies it into a fresh
/// `Uint8Array`; wrap that in a `Blob` for upload:
///
/// ```typescript
/// const file = new Blob([result.blob()], { type: 'image/jpeg' });
/// ```
#[wasm_bindgen]
pub struct JsExportResult {
    blob: Vec<u8>,
    data_url: String,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsExportResult {
    /// Encoded JPEG bytes as a Uint8Array (copied).
    pub fn blob(&self) -> Vec<u8> {
        self.blob.clone()
    }

    /// `data:image/jpeg;base64,...` form of the blob, ready for `<img src>`.
    #[wasm_bindgen(getter)]
    pub fn data_url(&self) -> String {
        self.data_url.clone()
    }

    /// Exported image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Exported image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the blob in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.blob.len()
    }
}

impl From<ExportResult> for JsExportResult {
    fn from(result: ExportResult) -> Self {
        Self {
            blob: result.blob,
            data_url: result.data_url,
            width: result.width,
            height: result.height,
        }
    }
}

/// Read a `{ x, y, width, height }` object into a CropRegion.
pub(crate) fn region_from_js(value: JsValue) -> Result<CropRegion, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop region: {e}")))
}

/// Report a failed export on the browser console.
pub(crate) fn warn(context: &str, err: &dyn std::fmt::Display) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("photocrop: {context}: {err}")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_export_result() {
        let result = JsExportResult::from(ExportResult {
            blob: vec![0xFF, 0xD8, 0xFF, 0xD9],
            data_url: "data:image/jpeg;base64,/9j/2Q==".to_string(),
            width: 1,
            height: 1,
        });
        assert_eq!(result.blob(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(result.data_url(), "data:image/jpeg;base64,/9j/2Q==");
        assert_eq!((result.width(), result.height()), (1, 1));
        assert_eq!(result.byte_length(), 4);
    }
}
