//! Color-tone transforms: summer, forest, sunset
//!
//! Each tone is a two-pass affine recombination of the R/G/B channels.
//! The passes are composed in `f32` with no intermediate clamping; only
//! the final value is clamped to `[0, 255]` and rounded. Alpha passes
//! through untouched. The channel mapping is exposed separately from the
//! whole-image application so it can be probed with out-of-range inputs.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// One of the built-in color tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Warm cast: lifted reds and greens, damped blues
    Summer,
    /// Green cast with a uniform darkening second pass
    Forest,
    /// Strong warm cast plus a mild contrast push around mid-gray
    Sunset,
}

impl Tone {
    /// Every tone, in presentation order
    pub const ALL: [Self; 3] = [Self::Summer, Self::Forest, Self::Sunset];

    /// Lowercase tone name as used on the wire and in the CLI
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
        }
    }

    /// Both affine passes composed, unclamped
    fn compose(self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        match self {
            Self::Summer => {
                let (r, g, b) = (r * 1.08 + 10.0, g * 1.06 + 6.0, b * 0.98 + 2.0);
                (r * 1.07 + 5.0, g * 1.03, b * 0.95 - 4.0)
            },
            Self::Forest => {
                let (r, g, b) = (r * 0.95, g * 1.12 + 5.0, b * 0.95);
                (r * 0.97, g * 0.97, b * 0.97)
            },
            Self::Sunset => {
                let (r, g, b) = (r * 1.18 + 12.0, g * 1.05 + 4.0, b * 0.85);
                (
                    (r - 128.0) * 1.05 + 128.0,
                    (g - 128.0) * 1.03 + 128.0,
                    (b - 128.0) * 1.02 + 128.0,
                )
            },
        }
    }

    /// Map one RGB triple through the tone
    ///
    /// Inputs may lie outside `[0, 255]`; the result never does. Clamps
    /// in `f32` first, then rounds, so composed intermediates keep their
    /// full precision.
    #[must_use]
    pub fn map_channels(self, r: f32, g: f32, b: f32) -> [u8; 3] {
        let (r, g, b) = self.compose(r, g, b);
        [quantize(r), quantize(g), quantize(b)]
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn quantize(channel: f32) -> u8 {
    channel.clamp(0.0, 255.0).round() as u8
}

/// Apply a tone to every pixel of an image, preserving alpha
#[must_use]
pub fn apply(image: &RgbaImage, tone: Tone) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let [r, g, b] = tone.map_channels(f32::from(r), f32::from(g), f32::from(b));
        pixel.0 = [r, g, b, a];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_summer_reference_pixel() {
        assert_eq!(Tone::Summer.map_channels(100.0, 150.0, 200.0), [131, 170, 184]);
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        // Composition runs unclamped; only the final quantize step clamps.
        assert_eq!(Tone::Summer.map_channels(300.0, -10.0, 128.0), [255, 0, 117]);
        assert_eq!(Tone::Forest.map_channels(300.0, -10.0, 128.0), [255, 0, 118]);
        assert_eq!(Tone::Sunset.map_channels(300.0, -10.0, 128.0), [255, 0, 108]);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for tone in Tone::ALL {
            let a = tone.map_channels(37.0, 181.0, 244.0);
            let b = tone.map_channels(37.0, 181.0, 244.0);
            assert_eq!(a, b, "{tone} mapping must be repeatable");
        }
    }

    #[test]
    fn test_apply_preserves_alpha_and_dimensions() {
        let image = RgbaImage::from_pixel(4, 3, Rgba([100, 150, 200, 77]));
        let toned = apply(&image, Tone::Summer);
        assert_eq!(toned.dimensions(), (4, 3));
        assert_eq!(toned.get_pixel(0, 0).0, [131, 170, 184, 77]);
        assert_eq!(toned.get_pixel(3, 2).0[3], 77);
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let before = image.clone();
        let _ = apply(&image, Tone::Sunset);
        assert_eq!(image, before);
    }

    #[test]
    fn test_tone_names() {
        assert_eq!(Tone::Summer.name(), "summer");
        assert_eq!(Tone::Forest.name(), "forest");
        assert_eq!(Tone::Sunset.name(), "sunset");
        assert_eq!(Tone::Sunset.to_string(), "sunset");
    }

    #[test]
    fn test_serde_lowercase_names() {
        assert_eq!(serde_json::to_string(&Tone::Forest).unwrap(), "\"forest\"");
        let back: Tone = serde_json::from_str("\"summer\"").unwrap();
        assert_eq!(back, Tone::Summer);
    }
}
