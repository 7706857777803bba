//! Browser canvas codec.
//!
//! Loads sources through an `<img>` element and rasterizes with a 2D canvas,
//! the way the crop dialog does on the main thread. Only available on
//! `wasm32`.
//!
//! Cross-origin images are requested with `crossOrigin = "anonymous"`;
//! without it the canvas is tainted and `toBlob` throws.

use photocrop_core::codec::{Bitmap, ImageCodec};
use photocrop_core::decode::{DecodeError, SourceRef};
use photocrop_core::export::{EncodedImage, ExportError, EXPORT_JPEG_QUALITY, EXPORT_MIME};
use photocrop_core::{to_data_url, CropPipeline, CropRegion, PipelineConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::types::{region_from_js, warn, JsExportResult};

/// A decoded `<img>` element.
#[derive(Debug, Clone)]
pub struct CanvasBitmap {
    image: HtmlImageElement,
}

impl Bitmap for CanvasBitmap {
    fn width(&self) -> u32 {
        self.image.natural_width()
    }

    fn height(&self) -> u32 {
        self.image.natural_height()
    }
}

/// [`ImageCodec`] backed by the browser's image decoder and canvas.
///
/// `<img>` decoding always applies EXIF orientation, so
/// [`PipelineConfig::apply_orientation`] has no effect here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasCodec;

impl CanvasCodec {
    fn image_src(source: &SourceRef) -> String {
        match source {
            SourceRef::DataUri { mime, bytes } => to_data_url(mime, bytes),
            // Relative paths resolve against the page URL
            SourceRef::File(path) => path.to_string_lossy().into_owned(),
            SourceRef::Url(url) => url.clone(),
        }
    }

    fn create_canvas(width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }

    /// Resolve with the canvas contents as a JPEG blob, or null.
    async fn to_blob(canvas: &HtmlCanvasElement) -> Result<Option<Blob>, JsValue> {
        let quality = JsValue::from_f64(EXPORT_JPEG_QUALITY as f64 / 100.0);
        let mut executor = |resolve: js_sys::Function, reject: js_sys::Function| {
            if let Err(err) = canvas.to_blob_with_type_and_encoder_options(&resolve, EXPORT_MIME, &quality) {
                // Calling reject on a fresh promise cannot fail
                reject.call1(&JsValue::NULL, &err).ok();
            }
        };
        let value = JsFuture::from(js_sys::Promise::new(&mut executor)).await?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        Ok(Some(value.dyn_into()?))
    }

    async fn draw(
        bitmap: &CanvasBitmap,
        region: &CropRegion,
        width: u32,
        height: u32,
    ) -> Result<Option<Vec<u8>>, JsValue> {
        let canvas = Self::create_canvas(width, height)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            &bitmap.image,
            region.x,
            region.y,
            region.width,
            region.height,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )?;

        let Some(blob) = Self::to_blob(&canvas).await? else {
            return Ok(None);
        };
        let buffer = JsFuture::from(blob.array_buffer()).await?;
        Ok(Some(js_sys::Uint8Array::new(&buffer).to_vec()))
    }
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

impl ImageCodec for CanvasCodec {
    type Bitmap = CanvasBitmap;

    async fn load(
        &self,
        source: &SourceRef,
        _config: &PipelineConfig,
    ) -> Result<CanvasBitmap, DecodeError> {
        let image = HtmlImageElement::new().map_err(|e| DecodeError::Fetch(js_message(&e)))?;
        image.set_cross_origin(Some("anonymous"));
        image.set_src(&Self::image_src(source));

        JsFuture::from(image.decode()).await.map_err(|e| match source {
            SourceRef::DataUri { .. } => DecodeError::CorruptedFile(js_message(&e)),
            _ => DecodeError::Fetch(format!("{}: {}", source.describe(), js_message(&e))),
        })?;

        if image.natural_width() == 0 || image.natural_height() == 0 {
            return Err(DecodeError::CorruptedFile(source.describe()));
        }
        Ok(CanvasBitmap { image })
    }

    async fn rasterize(
        &self,
        bitmap: &CanvasBitmap,
        region: &CropRegion,
        width: u32,
        height: u32,
    ) -> Result<EncodedImage, ExportError> {
        let bytes = Self::draw(bitmap, region, width, height)
            .await
            .map_err(|e| ExportError::EncodingFailed(js_message(&e)))?
            .filter(|bytes| !bytes.is_empty())
            .ok_or(ExportError::Empty {
                width: region.width,
                height: region.height,
            })?;

        Ok(EncodedImage {
            bytes,
            mime: EXPORT_MIME.to_string(),
            width,
            height,
        })
    }
}

/// Load `source` in the browser and export `region` of it as JPEG.
///
/// # Arguments
///
/// * `source` - Image URL, relative path or data URI
/// * `region` - `{ x, y, width, height }` in source pixels
///
/// # Example
///
/// ```typescript
/// const result = await export_crop(photoUrl, crop);
/// await uploadProfilePhoto(new Blob([result.blob()], { type: 'image/jpeg' }));
/// ```
#[wasm_bindgen]
pub async fn export_crop(source: String, region: JsValue) -> Result<JsExportResult, JsValue> {
    let region = region_from_js(region)?;
    CropPipeline::new(CanvasCodec)
        .export_str(&source, &region)
        .await
        .map(JsExportResult::from)
        .map_err(|e| {
            warn("export failed", &e);
            JsValue::from_str(&e.to_string())
        })
}
