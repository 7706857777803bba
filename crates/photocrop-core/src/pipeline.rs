//! The decode → rasterize export pipeline.
//!
//! One export runs per "save" action: load the source, rasterize the crop,
//! then derive the data URI from the encoded blob. A failed load ends the
//! export before the rasterizer is touched.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use crate::codec::ImageCodec;
use crate::config::PipelineConfig;
use crate::decode::{DecodeError, SourceRef};
use crate::export::{surface_size, ExportError, ExportResult};
use crate::region::CropRegion;

/// Any failure of a single export.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source could not be loaded; nothing was rasterized.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The crop produced no usable output.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// True for the empty-export condition.
    pub fn is_empty_export(&self) -> bool {
        matches!(self, PipelineError::Export(ExportError::Empty { .. }))
    }
}

/// Open/dismissed state of the dialog hosting an export.
///
/// Clones share state. Once dismissed, in-flight exports started with
/// [`CropPipeline::export_for`] drop their result.
#[derive(Debug, Clone, Default)]
pub struct DialogGuard {
    dismissed: Rc<Cell<bool>>,
}

impl DialogGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the dialog as dismissed.
    pub fn dismiss(&self) {
        self.dismissed.set(true);
    }

    pub fn is_open(&self) -> bool {
        !self.dismissed.get()
    }
}

/// Crop export pipeline over an [`ImageCodec`].
#[derive(Debug, Clone, Default)]
pub struct CropPipeline<C> {
    codec: C,
    config: PipelineConfig,
}

impl<C: ImageCodec> CropPipeline<C> {
    /// Create a pipeline with the default configuration.
    pub fn new(codec: C) -> Self {
        Self::with_config(codec, PipelineConfig::default())
    }

    pub fn with_config(codec: C, config: PipelineConfig) -> Self {
        Self { codec, config }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load `source` with the pipeline's codec.
    pub async fn load(&self, source: &SourceRef) -> Result<C::Bitmap, DecodeError> {
        self.codec.load(source, &self.config).await
    }

    /// Rasterize `region` of an already loaded bitmap.
    ///
    /// # Errors
    ///
    /// `ExportError::Empty` for degenerate or oversized regions; the codec is
    /// not called in that case.
    pub async fn rasterize(
        &self,
        bitmap: &C::Bitmap,
        region: &CropRegion,
    ) -> Result<ExportResult, ExportError> {
        let (width, height) = surface_size(region, &self.config)?;
        let encoded = self.codec.rasterize(bitmap, region, width, height).await?;
        if encoded.bytes.is_empty() {
            return Err(ExportError::Empty {
                width: region.width,
                height: region.height,
            });
        }
        Ok(ExportResult::from(encoded))
    }

    /// Load `source` and export `region` of it.
    pub async fn export(
        &self,
        source: &SourceRef,
        region: &CropRegion,
    ) -> Result<ExportResult, PipelineError> {
        let bitmap = self.load(source).await?;
        Ok(self.rasterize(&bitmap, region).await?)
    }

    /// Like [`export`](Self::export), parsing `source` first.
    pub async fn export_str(
        &self,
        source: &str,
        region: &CropRegion,
    ) -> Result<ExportResult, PipelineError> {
        let source = SourceRef::parse(source)?;
        self.export(&source, region).await
    }

    /// Export on behalf of a dialog that may be dismissed meanwhile.
    ///
    /// Returns `Ok(None)` if the dialog is closed at any await point; the
    /// remaining steps are skipped and whatever finished, result or error,
    /// is dropped.
    pub async fn export_for(
        &self,
        dialog: &DialogGuard,
        source: &SourceRef,
        region: &CropRegion,
    ) -> Result<Option<ExportResult>, PipelineError> {
        if !dialog.is_open() {
            return Ok(None);
        }

        let loaded = self.load(source).await;
        if !dialog.is_open() {
            return Ok(None);
        }

        let exported = self.rasterize(&loaded?, region).await;
        if !dialog.is_open() {
            return Ok(None);
        }
        Ok(Some(exported?))
    }
}
