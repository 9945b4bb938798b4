//! Freehand brush rendering
//!
//! Strokes are rendered by stamping filled discs along each segment at
//! sub-radius intervals, which gives the round caps and round joins of
//! a round-cap path stroke without a path rasterizer. Stamping mutates
//! the working buffer in place; committing the finished stroke to the
//! session is the controller's job.

use crate::error::{EditorError, Result};
use image::{Rgba, RgbaImage};

/// Parse a `#rrggbb` color string
///
/// A leading `#` is optional; exactly six hex digits are required.
///
/// # Errors
/// Returns [`EditorError::InvalidConfig`] for any other shape.
pub fn parse_hex_color(input: &str) -> Result<[u8; 3]> {
    let digits = input.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EditorError::config_value_error(
            "color",
            input,
            "#rrggbb hex notation",
        ));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(digits.get(range).unwrap_or_default(), 16).unwrap_or(0)
    };
    Ok([channel(0..2), channel(2..4), channel(4..6)])
}

/// Stamp one filled disc of diameter `width` centered at `(x, y)`
///
/// Coordinates are native pixels; fractional centers are honored by
/// testing pixel centers against the disc. Out-of-bounds parts are
/// clipped.
pub fn stamp(image: &mut RgbaImage, x: f64, y: f64, color: [u8; 3], width: f64) {
    let radius = (width / 2.0).max(0.5);
    let (img_w, img_h) = image.dimensions();

    let min_x = ((x - radius).floor().max(0.0)) as u32;
    let min_y = ((y - radius).floor().max(0.0)) as u32;
    let max_x = ((x + radius).ceil().min(f64::from(img_w))) as u32;
    let max_y = ((y + radius).ceil().min(f64::from(img_h))) as u32;

    let r2 = radius * radius;
    for py in min_y..max_y {
        for px in min_x..max_x {
            let dx = f64::from(px) + 0.5 - x;
            let dy = f64::from(py) + 0.5 - y;
            if dx * dx + dy * dy <= r2 {
                image.put_pixel(px, py, Rgba([color[0], color[1], color[2], 255]));
            }
        }
    }
}

/// Render one stroke segment from `from` to `to`
///
/// Stamps discs at half-radius spacing along the segment, endpoints
/// included, so consecutive segments join seamlessly.
pub fn segment(
    image: &mut RgbaImage,
    from: (f64, f64),
    to: (f64, f64),
    color: [u8; 3],
    width: f64,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length == 0.0 {
        stamp(image, from.0, from.1, color, width);
        return;
    }
    let spacing = (width / 4.0).max(0.5);
    let steps = (length / spacing).ceil() as u32;
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        stamp(image, from.0 + dx * t, from.1 + dy * t, color, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    fn painted(image: &RgbaImage, color: [u8; 3]) -> usize {
        image
            .pixels()
            .filter(|p| p.0[..3] == color)
            .count()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ffcc").unwrap(), [0, 255, 204]);
        assert_eq!(parse_hex_color("FF8000").unwrap(), [255, 128, 0]);
        assert_eq!(parse_hex_color(" #000000 ").unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("#12345").is_err());
    }

    #[test]
    fn test_stamp_paints_disc() {
        let mut image = blank(20, 20);
        stamp(&mut image, 10.0, 10.0, [255, 0, 0], 6.0);

        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(8, 10).0, [255, 0, 0, 255]);
        // Corner of the bounding box stays outside the disc.
        assert_eq!(image.get_pixel(7, 7).0, [255, 255, 255, 255]);
        assert!(painted(&image, [255, 0, 0]) > 0);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let mut image = blank(10, 10);
        stamp(&mut image, 0.0, 0.0, [0, 0, 255], 8.0);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(9, 9).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_segment_connects_endpoints() {
        let mut image = blank(30, 30);
        segment(&mut image, (5.0, 15.0), (25.0, 15.0), [0, 128, 0], 3.0);

        // Every column along the path gets ink.
        for x in 5..=25 {
            assert_eq!(
                image.get_pixel(x, 15).0,
                [0, 128, 0, 255],
                "gap in stroke at x={x}"
            );
        }
        // Rows far from the path stay untouched.
        assert_eq!(image.get_pixel(15, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_length_segment_is_a_dot() {
        let mut image = blank(10, 10);
        segment(&mut image, (5.0, 5.0), (5.0, 5.0), [1, 2, 3], 2.0);
        assert!(painted(&image, [1, 2, 3]) > 0);
    }

    #[test]
    fn test_wider_stroke_covers_more_pixels() {
        let mut thin = blank(40, 40);
        let mut thick = blank(40, 40);
        segment(&mut thin, (5.0, 20.0), (35.0, 20.0), [0, 0, 0], 2.0);
        segment(&mut thick, (5.0, 20.0), (35.0, 20.0), [0, 0, 0], 8.0);
        assert!(painted(&thick, [0, 0, 0]) > painted(&thin, [0, 0, 0]));
    }
}
