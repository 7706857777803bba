//! Crop regions in source-image pixel space.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the decoded (oriented) source image
//! - `x`/`y`/`width`/`height` are fractional pixels, exactly as emitted by
//!   the crop selector
//! - Regions may extend past the image edges; the rasterizer treats the
//!   outside as black

use serde::{Deserialize, Serialize};

/// A rectangular region to retain from the source image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge in source pixels.
    pub x: f64,
    /// Top edge in source pixels.
    pub y: f64,
    /// Width in source pixels.
    pub width: f64,
    /// Height in source pixels.
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Output surface size for this region.
    ///
    /// Extents are rounded down to whole pixels with a floor of 1, so a
    /// 0.4-pixel-wide region still produces a single column. Returns `None`
    /// when either extent is zero, negative or not finite, which is the
    /// empty-export condition. A non-finite origin is also rejected.
    pub fn output_size(&self) -> Option<(u32, u32)> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return None;
        }
        Some((surface_extent(self.width)?, surface_extent(self.height)?))
    }

    /// Build a pixel region from normalized (0.0 to 1.0) coordinates.
    ///
    /// Useful when the selector reports percentages instead of pixels.
    pub fn from_normalized(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        let sw = source_width as f64;
        let sh = source_height as f64;
        Self {
            x: left * sw,
            y: top * sh,
            width: width * sw,
            height: height * sh,
        }
    }

    /// Largest region with the given width/height `aspect` centered in the source.
    ///
    /// Returns the full image when `aspect` is not a positive finite number.
    pub fn centered_aspect(source_width: u32, source_height: u32, aspect: f64) -> Self {
        let sw = source_width as f64;
        let sh = source_height as f64;
        if !(aspect.is_finite() && aspect > 0.0) || sw == 0.0 || sh == 0.0 {
            return Self::new(0.0, 0.0, sw, sh);
        }

        let (width, height) = if sw / sh > aspect {
            (sh * aspect, sh)
        } else {
            (sw, sw / aspect)
        };

        Self {
            x: (sw - width) / 2.0,
            y: (sh - height) / 2.0,
            width,
            height,
        }
    }

    /// Width over height, or `None` for degenerate regions.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
            .then(|| self.width / self.height)
    }
}

fn surface_extent(extent: f64) -> Option<u32> {
    if !extent.is_finite() || extent <= 0.0 {
        return None;
    }
    // `as` saturates at u32::MAX; the surface limit check catches that.
    Some((extent.floor() as u32).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_size_floors() {
        let region = CropRegion::new(10.7, 3.2, 200.9, 300.1);
        assert_eq!(region.output_size(), Some((200, 300)));
    }

    #[test]
    fn test_output_size_unit() {
        assert_eq!(CropRegion::new(0.0, 0.0, 1.0, 1.0).output_size(), Some((1, 1)));
    }

    #[test]
    fn test_output_size_sub_pixel_is_one() {
        assert_eq!(CropRegion::new(0.0, 0.0, 0.4, 2.5).output_size(), Some((1, 2)));
    }

    #[test]
    fn test_output_size_zero_is_empty() {
        assert_eq!(CropRegion::new(0.0, 0.0, 0.0, 10.0).output_size(), None);
        assert_eq!(CropRegion::new(0.0, 0.0, 10.0, 0.0).output_size(), None);
    }

    #[test]
    fn test_output_size_invalid_is_empty() {
        assert_eq!(CropRegion::new(0.0, 0.0, -5.0, 10.0).output_size(), None);
        assert_eq!(CropRegion::new(0.0, 0.0, f64::NAN, 10.0).output_size(), None);
        assert_eq!(CropRegion::new(f64::INFINITY, 0.0, 1.0, 1.0).output_size(), None);
    }

    #[test]
    fn test_from_normalized() {
        let region = CropRegion::from_normalized(0.25, 0.5, 0.5, 0.25, 1000, 800);
        assert_eq!(region, CropRegion::new(250.0, 400.0, 500.0, 200.0));
    }

    #[test]
    fn test_centered_aspect_landscape_source() {
        // 1000x800 source, square crop limited by height
        let region = CropRegion::centered_aspect(1000, 800, 1.0);
        assert_eq!(region, CropRegion::new(100.0, 0.0, 800.0, 800.0));
    }

    #[test]
    fn test_centered_aspect_portrait_crop() {
        let region = CropRegion::centered_aspect(1000, 800, 0.5);
        assert_eq!(region.width, 400.0);
        assert_eq!(region.height, 800.0);
        assert_eq!(region.x, 300.0);
    }

    #[test]
    fn test_centered_aspect_wide_crop() {
        let region = CropRegion::centered_aspect(100, 100, 2.0);
        assert_eq!(region, CropRegion::new(0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_centered_aspect_invalid_ratio() {
        let region = CropRegion::centered_aspect(100, 50, 0.0);
        assert_eq!(region, CropRegion::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(CropRegion::new(0.0, 0.0, 200.0, 100.0).aspect_ratio(), Some(2.0));
        assert_eq!(CropRegion::new(0.0, 0.0, 200.0, 0.0).aspect_ratio(), None);
    }
}
