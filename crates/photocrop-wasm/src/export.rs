//! Synchronous crop export bindings.
//!
//! These run the pure-Rust raster codec, so they work in Web Workers and
//! anywhere the image bytes are already in hand (e.g. from `File.arrayBuffer()`).
//!
//! # Example
//!
//! ```typescript
//! import { export_crop_bytes } from '@photocrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = export_crop_bytes(bytes, { x: 100, y: 50, width: 200, height: 300 });
//! preview.src = result.data_url;
//! ```

use photocrop_core::export::rasterize;
use photocrop_core::{CropRegion, ExportResult, PipelineConfig, PipelineError, RasterCodec};
use wasm_bindgen::prelude::*;

use crate::types::{region_from_js, warn, JsExportResult};

/// Crop `region` out of encoded image `bytes` and export it as JPEG.
///
/// # Arguments
///
/// * `bytes` - JPEG or PNG file bytes as a `Uint8Array`
/// * `region` - `{ x, y, width, height }` in source pixels
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded, the region is not an
/// object of numbers, or the crop is empty (zero width or height).
#[wasm_bindgen]
pub fn export_crop_bytes(bytes: &[u8], region: JsValue) -> Result<JsExportResult, JsValue> {
    let region = region_from_js(region)?;
    export_bytes(bytes, &region)
        .map(JsExportResult::from)
        .map_err(|e| {
            warn("export failed", &e);
            JsValue::from_str(&e.to_string())
        })
}

/// Largest centered region with the given width/height ratio.
///
/// Returns a `{ x, y, width, height }` object for seeding the crop selector.
#[wasm_bindgen]
pub fn centered_aspect_region(
    source_width: u32,
    source_height: u32,
    aspect: f64,
) -> Result<JsValue, JsValue> {
    let region = CropRegion::centered_aspect(source_width, source_height, aspect);
    serde_wasm_bindgen::to_value(&region).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn export_bytes(bytes: &[u8], region: &CropRegion) -> Result<ExportResult, PipelineError> {
    let config = PipelineConfig::default();
    let bitmap = RasterCodec::new().load_bytes(bytes, &config)?;
    let encoded = rasterize(&bitmap, region, &config)?;
    Ok(ExportResult::from(encoded))
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use photocrop_core::export::encode_jpeg;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn region(x: f64, y: f64, width: f64, height: f64) -> JsValue {
        serde_wasm_bindgen::to_value(&CropRegion::new(x, y, width, height)).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_export_crop_bytes() {
        let bytes = encode_jpeg(&vec![128u8; 50 * 40 * 3], 50, 40, 90).unwrap();
        let result = export_crop_bytes(&bytes, region(5.0, 5.0, 20.0, 10.0)).unwrap();
        assert_eq!((result.width(), result.height()), (20, 10));
    }

    #[wasm_bindgen_test]
    fn test_export_crop_bytes_rejects_bad_region() {
        let bytes = encode_jpeg(&vec![128u8; 10 * 10 * 3], 10, 10, 90).unwrap();
        assert!(export_crop_bytes(&bytes, JsValue::from_str("nope")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_centered_aspect_region() {
        let value = centered_aspect_region(1000, 800, 1.0).unwrap();
        let region: CropRegion = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(region, CropRegion::new(100.0, 0.0, 800.0, 800.0));
    }
}
