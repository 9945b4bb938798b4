//! Fit-to-container sizing and display/native coordinate mapping
//!
//! The editing surface holds native pixels; the viewport describes how that
//! surface is presented inside a bounded display container. Fitting never
//! upscales: an image smaller than the container is shown pixel-for-pixel,
//! a larger one is scaled down uniformly to fit.
//!
//! Pointer input arrives in display coordinates. All pixel operations run
//! at native resolution, so the viewport is also the single place where
//! display coordinates are mapped back to native ones.

use crate::config::EditorConfig;

/// Axis-aligned rectangle in display-space coordinates
///
/// Produced by pointer drags; fractional because display positions are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    /// Left edge in display pixels
    pub x: f64,
    /// Top edge in display pixels
    pub y: f64,
    /// Width in display pixels
    pub width: f64,
    /// Height in display pixels
    pub height: f64,
}

impl DisplayRect {
    /// Build a normalized rectangle from two opposite corners
    ///
    /// Corner order does not matter; the result always has non-negative
    /// width and height.
    #[must_use]
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x: ax.min(bx),
            y: ay.min(by),
            width: (bx - ax).abs(),
            height: (by - ay).abs(),
        }
    }
}

/// Axis-aligned rectangle in native pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge in native pixels
    pub x: u32,
    /// Top edge in native pixels
    pub y: u32,
    /// Width in native pixels
    pub width: u32,
    /// Height in native pixels
    pub height: u32,
}

/// Display container bound the surface is fitted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    max_width: u32,
    max_height: u32,
}

impl Viewport {
    /// Create a viewport with the given container bound in display pixels
    #[must_use]
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
        }
    }

    /// Create a viewport from an editor configuration's container bound
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.container_width, config.container_height)
    }

    /// Container bound as `(max_width, max_height)`
    #[must_use]
    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }

    /// Uniform scale presenting a surface of the given size inside the container
    ///
    /// `min(1, max_width / width, max_height / height)`: shrink to fit,
    /// never upscale. Degenerate surface dimensions yield 1.
    #[must_use]
    pub fn fit_scale(&self, width: u32, height: u32) -> f64 {
        if width == 0 || height == 0 {
            return 1.0;
        }
        let sx = f64::from(self.max_width) / f64::from(width);
        let sy = f64::from(self.max_height) / f64::from(height);
        sx.min(sy).min(1.0)
    }

    /// Display size of a surface after fitting, truncated to whole pixels
    ///
    /// Equal to the surface size whenever it already fits.
    #[must_use]
    pub fn fit_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scale = self.fit_scale(width, height);
        if scale >= 1.0 {
            return (width, height);
        }
        let w = (f64::from(width) * scale) as u32;
        let h = (f64::from(height) * scale) as u32;
        (w.max(1), h.max(1))
    }

    /// Map a display-space rectangle onto a surface's native pixel grid
    ///
    /// Divides by the fit scale of the surface, then clamps to the surface
    /// bounds. Returns `None` when the rectangle lies outside the surface
    /// or collapses to zero area after mapping. At fit scale 1 the mapping
    /// is the identity (up to truncation of fractional pointer positions).
    #[must_use]
    pub fn to_native_rect(
        &self,
        surface_width: u32,
        surface_height: u32,
        rect: DisplayRect,
    ) -> Option<PixelRect> {
        if surface_width == 0 || surface_height == 0 {
            return None;
        }
        let scale = self.fit_scale(surface_width, surface_height);

        let x = (rect.x / scale).floor().max(0.0) as u32;
        let y = (rect.y / scale).floor().max(0.0) as u32;
        if x >= surface_width || y >= surface_height {
            return None;
        }

        let width = ((rect.width / scale).round() as u32).min(surface_width - x);
        let height = ((rect.height / scale).round() as u32).min(surface_height - y);
        if width == 0 || height == 0 {
            return None;
        }

        Some(PixelRect {
            x,
            y,
            width,
            height,
        })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale_small_image_is_one() {
        let viewport = Viewport::new(960, 720);
        assert!((viewport.fit_scale(640, 480) - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.fit_size(640, 480), (640, 480));
    }

    #[test]
    fn test_fit_scale_never_upscales() {
        let viewport = Viewport::new(960, 720);
        assert!((viewport.fit_scale(10, 10) - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.fit_size(10, 10), (10, 10));
    }

    #[test]
    fn test_fit_scale_wide_image_limited_by_width() {
        let viewport = Viewport::new(960, 720);
        let scale = viewport.fit_scale(1920, 1080);
        assert!((scale - 0.5).abs() < f64::EPSILON);
        assert_eq!(viewport.fit_size(1920, 1080), (960, 540));
    }

    #[test]
    fn test_fit_scale_tall_image_limited_by_height() {
        let viewport = Viewport::new(960, 720);
        let scale = viewport.fit_scale(720, 1440);
        assert!((scale - 0.5).abs() < f64::EPSILON);
        assert_eq!(viewport.fit_size(720, 1440), (360, 720));
    }

    #[test]
    fn test_fit_size_truncates_fractional_pixels() {
        let viewport = Viewport::new(960, 720);
        // scale = 720/960 = 0.75, width 825.75 truncates to 825
        assert_eq!(viewport.fit_size(1101, 960), (825, 720));
    }

    #[test]
    fn test_native_mapping_identity_at_scale_one() {
        let viewport = Viewport::new(960, 720);
        let rect = DisplayRect::from_corners(10.0, 20.0, 110.0, 70.0);
        let mapped = viewport.to_native_rect(640, 480, rect).unwrap();
        assert_eq!(
            mapped,
            PixelRect {
                x: 10,
                y: 20,
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_native_mapping_scales_up_selection() {
        let viewport = Viewport::new(960, 720);
        // 1920x1080 surface displays at scale 0.5
        let rect = DisplayRect::from_corners(100.0, 50.0, 200.0, 150.0);
        let mapped = viewport.to_native_rect(1920, 1080, rect).unwrap();
        assert_eq!(
            mapped,
            PixelRect {
                x: 200,
                y: 100,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_native_mapping_clamps_to_surface() {
        let viewport = Viewport::new(960, 720);
        let rect = DisplayRect::from_corners(600.0, 400.0, 700.0, 500.0);
        let mapped = viewport.to_native_rect(640, 480, rect).unwrap();
        assert_eq!(mapped.x, 600);
        assert_eq!(mapped.y, 400);
        assert_eq!(mapped.width, 40);
        assert_eq!(mapped.height, 80);
    }

    #[test]
    fn test_native_mapping_outside_surface_is_none() {
        let viewport = Viewport::new(960, 720);
        let rect = DisplayRect::from_corners(700.0, 500.0, 800.0, 600.0);
        assert!(viewport.to_native_rect(640, 480, rect).is_none());
    }

    #[test]
    fn test_normalized_corners_any_order() {
        let a = DisplayRect::from_corners(110.0, 70.0, 10.0, 20.0);
        let b = DisplayRect::from_corners(10.0, 20.0, 110.0, 70.0);
        assert_eq!(a, b);
        assert!((a.width - 100.0).abs() < f64::EPSILON);
        assert!((a.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_config_uses_container_bound() {
        let config = EditorConfig::builder()
            .container_size(400, 300)
            .build()
            .unwrap();
        let viewport = Viewport::from_config(&config);
        assert_eq!(viewport.bounds(), (400, 300));
        assert_eq!(viewport.fit_size(800, 600), (400, 300));
    }
}
