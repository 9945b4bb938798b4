//! Crop selection, preview, and commit behavior through the editor
//!
//! Covers the full drag lifecycle: enabling the tool, preview rendering
//! with the dashed overlay, the minimum-drag threshold, and mapping the
//! committed display selection onto native pixels.

use image::{Rgba, RgbaImage};
use snapedit::{
    CropOutcome, Editor, EditorConfig, LoadSource, MockAiBackend, RasterSnapshot, Result,
};

/// Create a test photo with a diagonal gradient
fn test_photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = ((x * 255) / width.max(1)) as u8;
        let g = ((y * 255) / height.max(1)) as u8;
        Rgba([r, g, 96, 255])
    })
}

/// Build an editor with a gradient photo already loaded
fn loaded_editor(width: u32, height: u32) -> Result<Editor> {
    let mut editor = Editor::new(EditorConfig::default())?;
    editor.load_image(&test_photo(width, height), LoadSource::Upload)?;
    Ok(editor)
}

#[test]
fn test_commit_crops_native_pixels_at_identity_scale() -> Result<()> {
    let mut editor = loaded_editor(200, 150)?;
    let source = editor.current_snapshot().unwrap().decode()?;

    assert!(editor.enable_crop());
    assert!(editor.begin_crop_drag(20.0, 10.0));
    assert!(editor.update_crop_drag(120.0, 90.0)?.is_some());

    let outcome = editor.finish_crop_drag()?;
    assert!(matches!(outcome, CropOutcome::Committed(_)));

    let cropped = editor.current_snapshot().unwrap().decode()?;
    assert_eq!(cropped.dimensions(), (100, 80));
    // (0, 0) of the crop is (20, 10) of the source surface.
    assert_eq!(cropped.get_pixel(0, 0), source.get_pixel(20, 10));
    assert_eq!(cropped.get_pixel(99, 79), source.get_pixel(119, 89));

    // Committing is an edit and leaves crop mode.
    assert!(editor.can_undo());
    assert!(!editor.crop_enabled());
    Ok(())
}

#[tokio::test]
async fn test_commit_maps_selection_through_fit_scale() -> Result<()> {
    // Install a surface twice the container size via a service result, so
    // the editor presents it at scale 0.5.
    let oversized = RasterSnapshot::from_image(&test_photo(200, 200))?;
    let backend = MockAiBackend::new().with_result_image(oversized);
    let config = EditorConfig::builder().container_size(100, 100).build()?;
    let mut editor = Editor::with_backend(config, Box::new(backend))?;
    editor.load_image(&test_photo(50, 50), LoadSource::Upload)?;

    assert!(editor.blur_background().await?);
    let source = editor.current_snapshot().unwrap().decode()?;
    assert_eq!(source.dimensions(), (200, 200));
    assert!((editor.display_scale().unwrap() - 0.5).abs() < f64::EPSILON);

    editor.enable_crop();
    editor.begin_crop_drag(20.0, 20.0);
    assert!(editor.update_crop_drag(70.0, 60.0)?.is_some());
    let outcome = editor.finish_crop_drag()?;
    assert!(matches!(outcome, CropOutcome::Committed(_)));

    // A 50x40 display selection at scale 0.5 covers 100x80 native pixels.
    let cropped = editor.current_snapshot().unwrap().decode()?;
    assert_eq!(cropped.dimensions(), (100, 80));
    assert_eq!(cropped.get_pixel(0, 0), source.get_pixel(40, 40));
    Ok(())
}

#[test]
fn test_sub_threshold_drag_discards_selection() -> Result<()> {
    let mut editor = loaded_editor(200, 150)?;
    let before = editor.current_snapshot().unwrap().clone();

    editor.enable_crop();
    editor.begin_crop_drag(30.0, 30.0);
    // Wide enough horizontally, but only 6px of vertical travel.
    assert!(editor.update_crop_drag(90.0, 36.0)?.is_some());

    assert_eq!(editor.finish_crop_drag()?, CropOutcome::Discarded);
    assert_eq!(editor.current_snapshot(), Some(&before));
    assert!(!editor.can_undo());
    // A discarded drag still leaves crop mode.
    assert!(!editor.crop_enabled());
    Ok(())
}

#[test]
fn test_preview_draws_dashes_without_committing() -> Result<()> {
    let mut editor = loaded_editor(200, 150)?;
    let base = editor.current_snapshot().unwrap().decode()?;

    editor.enable_crop();
    editor.begin_crop_drag(10.0, 10.0);
    let frame = editor.update_crop_drag(80.0, 70.0)?.unwrap();

    let ink = Rgba([0x00, 0xff, 0xcc, 255]);
    // Dash phase starts painted at the rectangle origin.
    assert_eq!(*frame.get_pixel(10, 10), ink);
    assert_eq!(*frame.get_pixel(15, 10), ink);
    // Phase 6..10 is the gap: the base pixel shows through.
    assert_eq!(frame.get_pixel(16, 10), base.get_pixel(16, 10));
    // Interior is untouched.
    assert_eq!(frame.get_pixel(45, 40), base.get_pixel(45, 40));

    // Preview frames never reach the history.
    assert!(!editor.can_undo());
    assert_eq!(
        editor.current_snapshot().unwrap().decode()?.get_pixel(10, 10),
        base.get_pixel(10, 10)
    );
    Ok(())
}

#[test]
fn test_preview_requires_an_active_drag() -> Result<()> {
    let mut editor = loaded_editor(100, 100)?;
    editor.enable_crop();
    assert!(editor.update_crop_drag(50.0, 50.0)?.is_none());
    Ok(())
}

#[test]
fn test_finish_without_drag_is_inactive() -> Result<()> {
    let mut editor = loaded_editor(100, 100)?;
    editor.enable_crop();
    assert_eq!(editor.finish_crop_drag()?, CropOutcome::Inactive);
    // No drag happened, so the tool stays armed.
    assert!(editor.crop_enabled());
    Ok(())
}

#[test]
fn test_selection_clamps_to_the_surface() -> Result<()> {
    let mut editor = loaded_editor(200, 150)?;

    editor.enable_crop();
    editor.begin_crop_drag(150.0, 100.0);
    assert!(editor.update_crop_drag(260.0, 220.0)?.is_some());
    assert!(matches!(
        editor.finish_crop_drag()?,
        CropOutcome::Committed(_)
    ));

    // The selection ran past the surface; the crop stops at its edge.
    assert_eq!(editor.current_snapshot().unwrap().dimensions(), (50, 50));
    Ok(())
}

#[test]
fn test_undo_restores_pre_crop_surface() -> Result<()> {
    let mut editor = loaded_editor(200, 150)?;
    let before = editor.current_snapshot().unwrap().clone();

    editor.enable_crop();
    editor.begin_crop_drag(0.0, 0.0);
    assert!(editor.update_crop_drag(100.0, 100.0)?.is_some());
    editor.finish_crop_drag()?;
    assert_eq!(editor.current_snapshot().unwrap().dimensions(), (100, 100));

    assert!(editor.undo());
    assert_eq!(editor.current_snapshot(), Some(&before));
    Ok(())
}

#[test]
fn test_crop_and_pencil_are_mutually_exclusive() -> Result<()> {
    let mut editor = loaded_editor(100, 100)?;

    assert!(editor.enable_pencil());
    assert!(editor.enable_crop());
    assert!(!editor.pencil_enabled());
    // Stroke input is ignored while the pencil is off.
    assert!(!editor.begin_stroke(10.0, 10.0)?);

    assert!(editor.enable_pencil());
    assert!(!editor.crop_enabled());
    assert!(!editor.begin_crop_drag(10.0, 10.0));
    Ok(())
}

#[test]
fn test_crop_without_image_is_rejected() -> Result<()> {
    let mut editor = Editor::new(EditorConfig::default())?;
    assert!(!editor.enable_crop());
    assert!(!editor.begin_crop_drag(10.0, 10.0));
    assert_eq!(editor.finish_crop_drag()?, CropOutcome::Inactive);
    Ok(())
}

#[test]
fn test_undo_during_drag_cancels_the_selection() -> Result<()> {
    let mut editor = loaded_editor(200, 150)?;
    editor.brighten()?;

    editor.enable_crop();
    editor.begin_crop_drag(10.0, 10.0);
    assert!(editor.update_crop_drag(100.0, 100.0)?.is_some());

    // History navigation invalidates display coordinates mid-drag.
    assert!(editor.undo());
    assert_eq!(editor.finish_crop_drag()?, CropOutcome::Inactive);
    Ok(())
}
