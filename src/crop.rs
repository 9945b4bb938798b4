//! Interactive crop selection
//!
//! Tracks a pointer drag in display coordinates, renders the dashed
//! selection preview, and decides on release whether the selection is
//! large enough to commit. Mapping the committed display rectangle to
//! native pixels is done by [`crate::viewport::Viewport`].

use crate::viewport::DisplayRect;
use image::{Rgba, RgbaImage};

/// Selection outline color (teal)
pub const PREVIEW_COLOR: [u8; 3] = [0x00, 0xff, 0xcc];
/// Outline thickness in display pixels, drawn inward from the edge
pub const PREVIEW_LINE_WIDTH: u32 = 2;
/// Dash pattern: painted run length
pub const DASH_ON: u32 = 6;
/// Dash pattern: gap length
pub const DASH_OFF: u32 = 4;

/// An in-progress drag, anchor to latest pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSelection {
    anchor: (f64, f64),
    latest: (f64, f64),
}

impl CropSelection {
    /// Normalized bounding rectangle of the drag
    #[must_use]
    pub fn rect(&self) -> DisplayRect {
        DisplayRect::from_corners(self.anchor.0, self.anchor.1, self.latest.0, self.latest.1)
    }

    /// Absolute drag extent per axis
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        (
            (self.latest.0 - self.anchor.0).abs(),
            (self.latest.1 - self.anchor.1).abs(),
        )
    }
}

/// How a finished drag was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum CropOutcome {
    /// Selection spanned the minimum distance on both axes
    Committed(DisplayRect),
    /// Selection too small, abandoned without cropping
    Discarded,
    /// No drag was in progress
    Inactive,
}

/// Crop tool state machine
///
/// The tool must be enabled before a drag is accepted, and it disables
/// itself once a drag finishes, committed or not. A new crop requires
/// re-enabling the tool.
#[derive(Debug)]
pub struct CropTool {
    enabled: bool,
    selection: Option<CropSelection>,
    min_drag_px: u32,
}

impl CropTool {
    #[must_use]
    pub fn new(min_drag_px: u32) -> Self {
        Self {
            enabled: false,
            selection: None,
            min_drag_px,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable the tool, dropping any in-progress selection
    pub fn disable(&mut self) {
        self.enabled = false;
        self.selection = None;
    }

    /// Drop an in-progress selection without leaving crop mode
    pub fn cancel_drag(&mut self) {
        self.selection = None;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.selection.is_some()
    }

    /// Current selection rectangle, if a drag is in progress
    #[must_use]
    pub fn selection_rect(&self) -> Option<DisplayRect> {
        self.selection.as_ref().map(CropSelection::rect)
    }

    /// Start a drag at the given display position
    ///
    /// Returns `false` when the tool is not enabled; the event is
    /// ignored in that case.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        if !self.enabled {
            return false;
        }
        self.selection = Some(CropSelection {
            anchor: (x, y),
            latest: (x, y),
        });
        true
    }

    /// Extend the drag to a new pointer position
    ///
    /// Returns the updated selection rectangle for preview rendering,
    /// or `None` when no drag is in progress.
    pub fn update_drag(&mut self, x: f64, y: f64) -> Option<DisplayRect> {
        let selection = self.selection.as_mut()?;
        selection.latest = (x, y);
        Some(selection.rect())
    }

    /// Finish the drag and resolve it
    ///
    /// Selections narrower than the minimum drag distance on either
    /// axis are discarded. Finishing a drag always leaves the tool
    /// disabled.
    pub fn finish_drag(&mut self) -> CropOutcome {
        let Some(selection) = self.selection.take() else {
            return CropOutcome::Inactive;
        };
        self.enabled = false;

        let (dx, dy) = selection.span();
        let min = f64::from(self.min_drag_px);
        if dx < min || dy < min {
            return CropOutcome::Discarded;
        }
        CropOutcome::Committed(selection.rect())
    }
}

/// Composite the dashed selection outline over a display-sized frame
#[must_use]
pub fn render_preview(base: &RgbaImage, rect: &DisplayRect) -> RgbaImage {
    let mut frame = base.clone();
    draw_dashed_rect(&mut frame, rect);
    frame
}

/// Draw the dashed selection rectangle in place
///
/// Each edge restarts the 6-on/4-off dash phase at its own origin
/// corner. The rectangle is clipped to the image bounds.
pub fn draw_dashed_rect(image: &mut RgbaImage, rect: &DisplayRect) {
    let (img_w, img_h) = image.dimensions();
    let x0 = rect.x.floor().max(0.0).min(f64::from(img_w)) as u32;
    let y0 = rect.y.floor().max(0.0).min(f64::from(img_h)) as u32;
    let x1 = (rect.x + rect.width).ceil().max(0.0).min(f64::from(img_w)) as u32;
    let y1 = (rect.y + rect.height).ceil().max(0.0).min(f64::from(img_h)) as u32;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let ink = Rgba([PREVIEW_COLOR[0], PREVIEW_COLOR[1], PREVIEW_COLOR[2], 255]);
    let period = DASH_ON + DASH_OFF;

    let band_h = PREVIEW_LINE_WIDTH.min(y1 - y0);
    for x in x0..x1 {
        if (x - x0) % period >= DASH_ON {
            continue;
        }
        for dy in 0..band_h {
            image.put_pixel(x, y0 + dy, ink);
            image.put_pixel(x, y1 - 1 - dy, ink);
        }
    }

    let band_w = PREVIEW_LINE_WIDTH.min(x1 - x0);
    for y in y0..y1 {
        if (y - y0) % period >= DASH_ON {
            continue;
        }
        for dx in 0..band_w {
            image.put_pixel(x0 + dx, y, ink);
            image.put_pixel(x1 - 1 - dx, y, ink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> CropTool {
        let mut tool = CropTool::new(10);
        tool.enable();
        tool
    }

    #[test]
    fn test_drag_commits_selection() {
        let mut tool = tool();
        assert!(tool.begin_drag(10.0, 10.0));
        let rect = tool.update_drag(60.0, 50.0).unwrap();
        assert_eq!(rect, DisplayRect::from_corners(10.0, 10.0, 60.0, 50.0));

        match tool.finish_drag() {
            CropOutcome::Committed(committed) => {
                assert_eq!(committed.x, 10.0);
                assert_eq!(committed.y, 10.0);
                assert_eq!(committed.width, 50.0);
                assert_eq!(committed.height, 40.0);
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(!tool.is_enabled());
        assert!(!tool.is_dragging());
    }

    #[test]
    fn test_short_drag_is_discarded() {
        let mut tool = tool();
        tool.begin_drag(10.0, 10.0);
        // Tall but too narrow: both axes must reach the minimum.
        tool.update_drag(15.0, 200.0);
        assert_eq!(tool.finish_drag(), CropOutcome::Discarded);
        assert!(!tool.is_enabled());
    }

    #[test]
    fn test_exact_minimum_commits() {
        let mut tool = tool();
        tool.begin_drag(0.0, 0.0);
        tool.update_drag(10.0, 10.0);
        assert!(matches!(tool.finish_drag(), CropOutcome::Committed(_)));
    }

    #[test]
    fn test_reversed_drag_normalizes() {
        let mut tool = tool();
        tool.begin_drag(60.0, 50.0);
        let rect = tool.update_drag(10.0, 10.0).unwrap();
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 10.0);
        assert_eq!(rect.width, 50.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn test_drag_ignored_while_disabled() {
        let mut tool = CropTool::new(10);
        assert!(!tool.begin_drag(5.0, 5.0));
        assert_eq!(tool.update_drag(50.0, 50.0), None);
        assert_eq!(tool.finish_drag(), CropOutcome::Inactive);
    }

    #[test]
    fn test_finish_without_drag_is_inactive() {
        let mut tool = tool();
        assert_eq!(tool.finish_drag(), CropOutcome::Inactive);
        // No drag happened, so the tool stays armed.
        assert!(tool.is_enabled());
    }

    #[test]
    fn test_disable_drops_selection() {
        let mut tool = tool();
        tool.begin_drag(0.0, 0.0);
        tool.disable();
        assert!(!tool.is_dragging());
        assert_eq!(tool.finish_drag(), CropOutcome::Inactive);
    }

    #[test]
    fn test_dash_pattern_on_edges() {
        let base = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let rect = DisplayRect {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0,
        };
        let frame = render_preview(&base, &rect);

        let ink = [0x00, 0xff, 0xcc, 255];
        let blank = [255, 255, 255, 255];

        // Top edge: phase 0..6 painted, 6..10 blank, repeating.
        assert_eq!(frame.get_pixel(10, 10).0, ink);
        assert_eq!(frame.get_pixel(15, 10).0, ink);
        assert_eq!(frame.get_pixel(16, 10).0, blank);
        assert_eq!(frame.get_pixel(20, 10).0, ink);
        // Second row of the inward band is painted too.
        assert_eq!(frame.get_pixel(15, 11).0, ink);
        assert_eq!(frame.get_pixel(15, 12).0, blank);

        // Left edge restarts its own phase.
        assert_eq!(frame.get_pixel(10, 30).0, ink);
        assert_eq!(frame.get_pixel(11, 30).0, ink);

        // Interior and the base stay untouched.
        assert_eq!(frame.get_pixel(50, 50).0, blank);
        assert_eq!(base.get_pixel(10, 10).0, blank);
    }

    #[test]
    fn test_dashed_rect_clips_to_image() {
        let mut image = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let rect = DisplayRect {
            x: -15.0,
            y: -15.0,
            width: 100.0,
            height: 100.0,
        };
        // Must not panic; edges outside the frame are dropped.
        draw_dashed_rect(&mut image, &rect);
    }

    #[test]
    fn test_degenerate_rect_draws_nothing() {
        let base = RgbaImage::from_pixel(10, 10, Rgba([9, 9, 9, 255]));
        let rect = DisplayRect {
            x: 5.0,
            y: 5.0,
            width: 0.0,
            height: 0.0,
        };
        let frame = render_preview(&base, &rect);
        assert_eq!(frame, base);
    }
}
