//! Basic raster filters: grayscale, blur, brightness, contrast
//!
//! Brightness and contrast are single affine steps per channel, computed
//! in `f32` and quantized with clamp-then-round. Contrast pivots on true
//! mid-gray (127.5) so the midpoint is a fixed point of the transform.

use image::RgbaImage;

/// Gaussian blur sigma applied by the one-shot blur action, in pixels
pub const BLUR_SIGMA: f32 = 4.0;

/// Channel multiplier for one brighten step
pub const BRIGHTEN_FACTOR: f32 = 1.2;

/// Channel multiplier for one darken step
pub const DARKEN_FACTOR: f32 = 0.8;

/// Contrast slope for one increase step
pub const CONTRAST_UP_FACTOR: f32 = 1.2;

/// Contrast slope for one decrease step
pub const CONTRAST_DOWN_FACTOR: f32 = 0.8;

// Rec. 709 luma coefficients.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

const CONTRAST_PIVOT: f32 = 127.5;

/// Convert to grayscale, preserving alpha
#[must_use]
pub fn grayscale(image: &RgbaImage) -> RgbaImage {
    map_channels(image, |r, g, b| {
        let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
        (luma, luma, luma)
    })
}

/// Gaussian blur with the given sigma
///
/// Blurs all four channels, matching a raster surface blur where alpha
/// participates in the kernel.
#[must_use]
pub fn gaussian_blur(image: &RgbaImage, sigma: f32) -> RgbaImage {
    image::imageops::blur(image, sigma)
}

/// Scale every color channel by `factor`
#[must_use]
pub fn brightness(image: &RgbaImage, factor: f32) -> RgbaImage {
    map_channels(image, |r, g, b| (r * factor, g * factor, b * factor))
}

/// Scale contrast by `factor` around mid-gray
///
/// `c' = (c - 127.5) * factor + 127.5` per color channel.
#[must_use]
pub fn contrast(image: &RgbaImage, factor: f32) -> RgbaImage {
    let adjust = |c: f32| (c - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT;
    map_channels(image, move |r, g, b| (adjust(r), adjust(g), adjust(b)))
}

fn map_channels<F>(image: &RgbaImage, f: F) -> RgbaImage
where
    F: Fn(f32, f32, f32) -> (f32, f32, f32),
{
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = f(f32::from(r), f32::from(g), f32::from(b));
        pixel.0 = [quantize(r), quantize(g), quantize(b), a];
    }
    out
}

fn quantize(channel: f32) -> u8 {
    channel.clamp(0.0, 255.0).round() as u8
}
