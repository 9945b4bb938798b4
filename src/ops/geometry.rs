//! Geometric transforms: rotation, flip, crops, zoom
//!
//! All crops and the zoom operate on native pixels. Display-space
//! selections must be mapped through [`crate::viewport::Viewport`]
//! before they reach this module.

use crate::error::{EditorError, Result};
use crate::viewport::PixelRect;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Fraction of each axis a center crop retains
pub const CENTER_CROP_FRACTION: f64 = 0.8;

/// Rotate 90 degrees clockwise
///
/// Swaps width and height; the pixel mapping is exact, so four
/// applications restore the original buffer.
#[must_use]
pub fn rotate90(image: &RgbaImage) -> RgbaImage {
    imageops::rotate90(image)
}

/// Mirror around the vertical axis
#[must_use]
pub fn flip_horizontal(image: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(image)
}

/// Crop to the centered `fraction` of each axis
///
/// Output dimensions are `floor(fraction * width)` by
/// `floor(fraction * height)`; the crop is never scaled back up.
///
/// # Errors
/// Rejects a fraction outside `(0, 1]` and crops that collapse to zero
/// pixels.
pub fn center_crop(image: &RgbaImage, fraction: f64) -> Result<RgbaImage> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(EditorError::config_value_error(
            "crop fraction",
            fraction,
            "within (0, 1]",
        ));
    }
    let width = (f64::from(image.width()) * fraction).floor() as u32;
    let height = (f64::from(image.height()) * fraction).floor() as u32;
    if width == 0 || height == 0 {
        return Err(EditorError::processing(
            "center crop collapsed to zero pixels",
        ));
    }
    let x = (image.width() - width) / 2;
    let y = (image.height() - height) / 2;
    Ok(imageops::crop_imm(image, x, y, width, height).to_image())
}

/// Extract a native-pixel rectangle
///
/// # Errors
/// Rejects rectangles with zero area or extending past the image.
pub fn crop_to_rect(image: &RgbaImage, rect: PixelRect) -> Result<RgbaImage> {
    if rect.width == 0 || rect.height == 0 {
        return Err(EditorError::processing("crop rectangle has zero area"));
    }
    let (width, height) = image.dimensions();
    if rect.x.saturating_add(rect.width) > width || rect.y.saturating_add(rect.height) > height {
        return Err(EditorError::processing(format!(
            "crop rectangle {}x{}+{}+{} exceeds image bounds {width}x{height}",
            rect.width, rect.height, rect.x, rect.y
        )));
    }
    Ok(imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}

/// Resize to exact dimensions with bilinear sampling
///
/// Returns a clone when the dimensions already match.
#[must_use]
pub fn resize_to(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Zoom by `factor`, then re-clamp to the container bound
///
/// The target size is `factor` times the current size, reduced by
/// `min(max_width / w, max_height / h, 1)` so the result never exceeds
/// the container and zoom-in never exceeds true pixel scale.
///
/// # Errors
/// Rejects non-finite or non-positive factors.
pub fn zoom(image: &RgbaImage, factor: f64, max_width: u32, max_height: u32) -> Result<RgbaImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(EditorError::config_value_error(
            "zoom factor",
            factor,
            "a positive finite number",
        ));
    }
    let target_w = f64::from(image.width()) * factor;
    let target_h = f64::from(image.height()) * factor;
    let ratio = (f64::from(max_width) / target_w)
        .min(f64::from(max_height) / target_h)
        .min(1.0);
    let width = ((target_w * ratio) as u32).max(1);
    let height = ((target_h * ratio) as u32).max(1);
    Ok(resize_to(image, width, height))
}
