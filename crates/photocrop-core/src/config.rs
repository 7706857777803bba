//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Largest surface area most browsers allow for a single canvas (4096 x 4096).
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 16_777_216;

/// Tunables for a [`CropPipeline`](crate::CropPipeline).
///
/// The JPEG quality is deliberately absent: exports always use
/// [`EXPORT_JPEG_QUALITY`](crate::export::EXPORT_JPEG_QUALITY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Surfaces above this many pixels export as empty instead of allocating.
    pub max_surface_pixels: u64,
    /// Honor EXIF orientation when decoding, as browsers do for `<img>`.
    ///
    /// Only the pure-Rust codec reads this. The browser canvas codec always
    /// gets the oriented bitmap from `<img>` and ignores it.
    pub apply_orientation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
            apply_orientation: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new PipelineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a `width` x `height` surface may be allocated.
    pub fn allows_surface(&self, width: u32, height: u32) -> bool {
        (width as u64) * (height as u64) <= self.max_surface_pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::new();
        assert_eq!(config.max_surface_pixels, 4096 * 4096);
        assert!(config.apply_orientation);
    }

    #[test]
    fn test_allows_surface() {
        let mut config = PipelineConfig::default();
        assert!(config.allows_surface(4096, 4096));
        assert!(!config.allows_surface(4097, 4096));

        config.max_surface_pixels = 100;
        assert!(config.allows_surface(10, 10));
        assert!(!config.allows_surface(11, 10));
        assert!(!config.allows_surface(u32::MAX, u32::MAX));
    }
}
