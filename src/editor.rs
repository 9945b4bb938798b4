//! Editor controller
//!
//! Single-owner front door of the engine: owns the session, the tools,
//! the gallery, and the optional service backend, and exposes one
//! method per user action. Methods take `&mut self`, so two operations
//! can never interleave on one editor; a failed operation returns the
//! session exactly as it was.
//!
//! Operations that need an image are silent no-ops while the session is
//! empty. Device and service failures surface as errors without
//! touching state.

use crate::backend::{AiBackend, EmojiKind};
use crate::camera::{CameraSession, FrameSource};
use crate::config::EditorConfig;
use crate::crop::{self, CropOutcome, CropTool};
use crate::error::{EditorError, Result};
use crate::gallery::Gallery;
use crate::ops::{draw, filters, geometry, tone, Tone};
use crate::services::{ExportService, ImageIOService};
use crate::session::{EditSession, LoadSource};
use crate::types::RasterSnapshot;
use crate::viewport::Viewport;
use image::RgbaImage;
use instant::Instant;
use std::path::{Path, PathBuf};

/// Pencil color until the host picks one
pub const DEFAULT_PENCIL_COLOR: [u8; 3] = [0, 0, 0];
/// Pencil stroke width in native pixels until the host picks one
pub const DEFAULT_PENCIL_WIDTH: f64 = 4.0;

/// Freehand pencil state
#[derive(Debug)]
struct PencilTool {
    enabled: bool,
    color: [u8; 3],
    width: f64,
    stroke: Option<StrokeState>,
}

/// An in-progress stroke: the surface it paints and the last point, in
/// native pixels
#[derive(Debug)]
struct StrokeState {
    surface: RgbaImage,
    last: (f64, f64),
}

impl PencilTool {
    fn new() -> Self {
        Self {
            enabled: false,
            color: DEFAULT_PENCIL_COLOR,
            width: DEFAULT_PENCIL_WIDTH,
            stroke: None,
        }
    }
}

/// Headless photo editor
///
/// Construct one per editing surface, load an image, then call the
/// operation methods. Display-facing values (fit size, crop previews)
/// are computed against the configured container bound.
pub struct Editor {
    config: EditorConfig,
    viewport: Viewport,
    session: EditSession,
    crop: CropTool,
    pencil: PencilTool,
    gallery: Gallery,
    backend: Option<Box<dyn AiBackend>>,
    camera: Option<CameraSession>,
}

impl Editor {
    /// Create an editor without a processing service
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::from_config(&config);
        let session = EditSession::new(config.history_limit);
        let crop = CropTool::new(config.min_crop_drag_px);
        Ok(Self {
            config,
            viewport,
            session,
            crop,
            pencil: PencilTool::new(),
            gallery: Gallery::new(),
            backend: None,
            camera: None,
        })
    }

    /// Create an editor wired to a processing service
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn with_backend(config: EditorConfig, backend: Box<dyn AiBackend>) -> Result<Self> {
        let mut editor = Self::new(config)?;
        editor.backend = Some(backend);
        Ok(editor)
    }

    /// Attach or replace the processing service
    pub fn set_backend(&mut self, backend: Box<dyn AiBackend>) {
        self.backend = Some(backend);
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.session.has_image()
    }

    /// Snapshot currently displayed, if any
    #[must_use]
    pub fn current_snapshot(&self) -> Option<&RasterSnapshot> {
        self.session.current()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Display size of the current surface after fitting, if any
    #[must_use]
    pub fn display_size(&self) -> Option<(u32, u32)> {
        let (w, h) = self.session.current()?.dimensions();
        Some(self.viewport.fit_size(w, h))
    }

    /// Display scale of the current surface, if any
    #[must_use]
    pub fn display_scale(&self) -> Option<f64> {
        let (w, h) = self.session.current()?.dimensions();
        Some(self.viewport.fit_scale(w, h))
    }

    // ------------------------------------------------------------------
    // Loading

    /// Load an image from encoded bytes (PNG, JPEG, ...)
    ///
    /// # Errors
    /// Returns an error if the bytes fail to decode. The previous
    /// session survives a failed load.
    pub fn load_from_bytes(&mut self, bytes: &[u8], source: LoadSource) -> Result<()> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        self.load_image(&decoded, source)
    }

    /// Load an image from disk as a new upload
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let decoded = ImageIOService::load_image(path.as_ref())?;
        self.load_image(&decoded, LoadSource::Upload)
    }

    /// Load a decoded image into the session
    ///
    /// The image is fitted to the container (never upscaled) and both
    /// tools are reset.
    ///
    /// # Errors
    /// Returns an error if the fitted surface fails to encode.
    pub fn load_image(&mut self, image: &RgbaImage, source: LoadSource) -> Result<()> {
        self.session.load_image(image, source, &self.viewport)?;
        self.reset_tools();
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            ?source,
            "image loaded"
        );
        Ok(())
    }

    /// Clear the session and tools; the camera stays as it is
    pub fn clear(&mut self) {
        self.session.clear();
        self.reset_tools();
    }

    fn reset_tools(&mut self) {
        self.pencil.enabled = false;
        self.pencil.stroke = None;
        self.crop.disable();
    }

    // ------------------------------------------------------------------
    // History

    /// Step back one edit; `false` when already at the first state
    pub fn undo(&mut self) -> bool {
        self.pencil.stroke = None;
        self.crop.cancel_drag();
        self.session.undo().is_some()
    }

    /// Re-apply the most recently undone edit; `false` when there is none
    pub fn redo(&mut self) -> bool {
        self.pencil.stroke = None;
        self.crop.cancel_drag();
        self.session.redo().is_some()
    }

    /// Re-surface the first-loaded image as a new edit
    pub fn show_original(&mut self) -> bool {
        self.session.show_original().is_some()
    }

    // ------------------------------------------------------------------
    // Local pixel operations

    fn apply_local<F>(&mut self, op: &str, transform: F) -> Result<()>
    where
        F: FnOnce(&RgbaImage) -> Result<RgbaImage>,
    {
        let Some(current) = self.session.current() else {
            tracing::debug!(op, "no image loaded; ignoring");
            return Ok(());
        };
        let started = Instant::now();
        let decoded = current.decode()?;
        let transformed = transform(&decoded)?;
        let snapshot = RasterSnapshot::from_image(&transformed)?;
        self.session.commit(snapshot);
        tracing::debug!(op, "applied in {:?}", started.elapsed());
        Ok(())
    }

    /// Convert to grayscale (luma replicated across RGB)
    pub fn grayscale(&mut self) -> Result<()> {
        self.apply_local("grayscale", |image| Ok(filters::grayscale(image)))
    }

    /// Apply the fixed gaussian blur
    pub fn blur(&mut self) -> Result<()> {
        self.apply_local("blur", |image| {
            Ok(filters::gaussian_blur(image, filters::BLUR_SIGMA))
        })
    }

    /// Brighten by the fixed step
    pub fn brighten(&mut self) -> Result<()> {
        self.apply_local("brighten", |image| {
            Ok(filters::brightness(image, filters::BRIGHTEN_FACTOR))
        })
    }

    /// Darken by the fixed step
    pub fn darken(&mut self) -> Result<()> {
        self.apply_local("darken", |image| {
            Ok(filters::brightness(image, filters::DARKEN_FACTOR))
        })
    }

    /// Raise contrast around mid-gray by the fixed step
    pub fn increase_contrast(&mut self) -> Result<()> {
        self.apply_local("increase_contrast", |image| {
            Ok(filters::contrast(image, filters::CONTRAST_UP_FACTOR))
        })
    }

    /// Lower contrast around mid-gray by the fixed step
    pub fn decrease_contrast(&mut self) -> Result<()> {
        self.apply_local("decrease_contrast", |image| {
            Ok(filters::contrast(image, filters::CONTRAST_DOWN_FACTOR))
        })
    }

    /// Rotate a quarter turn clockwise; width and height swap
    pub fn rotate90(&mut self) -> Result<()> {
        self.apply_local("rotate90", |image| Ok(geometry::rotate90(image)))
    }

    /// Mirror horizontally
    pub fn flip_horizontal(&mut self) -> Result<()> {
        self.apply_local("flip_horizontal", |image| {
            Ok(geometry::flip_horizontal(image))
        })
    }

    /// Crop to the centered 80% of each axis
    pub fn crop_center(&mut self) -> Result<()> {
        self.apply_local("crop_center", |image| {
            geometry::center_crop(image, geometry::CENTER_CROP_FRACTION)
        })
    }

    /// Rescale by `factor`, clamped so the result never exceeds the
    /// container bound or 100% true scale
    ///
    /// # Errors
    /// Returns an error for a non-finite or non-positive factor; the
    /// session is untouched in that case.
    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        let (max_width, max_height) = self.viewport.bounds();
        self.apply_local("zoom", |image| {
            geometry::zoom(image, factor, max_width, max_height)
        })
    }

    /// Apply a named tone recombination
    pub fn apply_tone(&mut self, tone: Tone) -> Result<()> {
        self.apply_local(tone.name(), |image| Ok(tone::apply(image, tone)))
    }

    // ------------------------------------------------------------------
    // Pencil

    #[must_use]
    pub fn pencil_enabled(&self) -> bool {
        self.pencil.enabled
    }

    /// Enable the pencil; crop mode turns off
    ///
    /// Returns `false` while no image is loaded.
    pub fn enable_pencil(&mut self) -> bool {
        if !self.session.has_image() {
            tracing::debug!("no image loaded; pencil not enabled");
            return false;
        }
        self.crop.disable();
        self.pencil.enabled = true;
        true
    }

    pub fn disable_pencil(&mut self) {
        self.pencil.enabled = false;
        self.pencil.stroke = None;
    }

    pub fn set_pencil_color(&mut self, color: [u8; 3]) {
        self.pencil.color = color;
    }

    /// Set the stroke width in native pixels
    ///
    /// # Errors
    /// Rejects non-finite or non-positive widths.
    pub fn set_pencil_width(&mut self, width: f64) -> Result<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(EditorError::config_value_error(
                "pencil width",
                width,
                "a positive number of pixels",
            ));
        }
        self.pencil.width = width;
        Ok(())
    }

    /// Begin a stroke at a display position
    ///
    /// Returns `Ok(false)` when the pencil is off or no image is
    /// loaded.
    ///
    /// # Errors
    /// Returns an error if the current snapshot fails to decode.
    pub fn begin_stroke(&mut self, x: f64, y: f64) -> Result<bool> {
        if !self.pencil.enabled {
            return Ok(false);
        }
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring stroke");
            return Ok(false);
        };
        let mut surface = current.decode()?;
        let scale = self
            .viewport
            .fit_scale(surface.width(), surface.height());
        let point = (x / scale, y / scale);
        draw::stamp(
            &mut surface,
            point.0,
            point.1,
            self.pencil.color,
            self.pencil.width,
        );
        self.pencil.stroke = Some(StrokeState {
            surface,
            last: point,
        });
        Ok(true)
    }

    /// Extend the stroke to a new display position
    ///
    /// Returns the painted working surface for preview rendering, or
    /// `None` when no stroke is in progress. Nothing is committed yet.
    pub fn extend_stroke(&mut self, x: f64, y: f64) -> Option<&RgbaImage> {
        let viewport = self.viewport;
        let color = self.pencil.color;
        let width = self.pencil.width;
        let stroke = self.pencil.stroke.as_mut()?;

        let scale = viewport.fit_scale(stroke.surface.width(), stroke.surface.height());
        let to = (x / scale, y / scale);
        draw::segment(&mut stroke.surface, stroke.last, to, color, width);
        stroke.last = to;
        Some(&stroke.surface)
    }

    /// Finish the stroke, committing it as one history entry
    ///
    /// Returns `Ok(false)` when no stroke was in progress.
    ///
    /// # Errors
    /// Returns an error if the painted surface fails to encode; the
    /// stroke is dropped either way.
    pub fn end_stroke(&mut self) -> Result<bool> {
        let Some(stroke) = self.pencil.stroke.take() else {
            return Ok(false);
        };
        let snapshot = RasterSnapshot::from_image(&stroke.surface)?;
        self.session.commit(snapshot);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Manual crop

    #[must_use]
    pub fn crop_enabled(&self) -> bool {
        self.crop.is_enabled()
    }

    /// Arm the crop tool; pencil mode turns off
    ///
    /// Returns `false` while no image is loaded.
    pub fn enable_crop(&mut self) -> bool {
        if !self.session.has_image() {
            tracing::debug!("no image loaded; crop not enabled");
            return false;
        }
        self.disable_pencil();
        self.crop.enable();
        true
    }

    pub fn disable_crop(&mut self) {
        self.crop.disable();
    }

    /// Start a crop drag at a display position
    pub fn begin_crop_drag(&mut self, x: f64, y: f64) -> bool {
        self.crop.begin_drag(x, y)
    }

    /// Extend the crop drag, returning the dashed preview frame
    ///
    /// The preview is the fitted base image with the selection outline
    /// composited over it; nothing is committed.
    ///
    /// # Errors
    /// Returns an error if the current snapshot fails to decode.
    pub fn update_crop_drag(&mut self, x: f64, y: f64) -> Result<Option<RgbaImage>> {
        let Some(rect) = self.crop.update_drag(x, y) else {
            return Ok(None);
        };
        let Some(base) = self.render_display()? else {
            return Ok(None);
        };
        Ok(Some(crop::render_preview(&base, &rect)))
    }

    /// Finish the crop drag and apply the selection
    ///
    /// Selections under the minimum drag distance are discarded and the
    /// pre-drag image stands. Committed selections are mapped from
    /// display to native coordinates and cut from the full-resolution
    /// snapshot. Crop mode is off afterwards either way.
    ///
    /// # Errors
    /// Returns an error if decoding, cropping, or encoding fails; the
    /// session is untouched in that case.
    pub fn finish_crop_drag(&mut self) -> Result<CropOutcome> {
        let outcome = self.crop.finish_drag();
        let CropOutcome::Committed(rect) = &outcome else {
            return Ok(outcome);
        };
        let Some(current) = self.session.current() else {
            return Ok(CropOutcome::Discarded);
        };

        let (surface_w, surface_h) = current.dimensions();
        let Some(native) = self.viewport.to_native_rect(surface_w, surface_h, *rect) else {
            tracing::debug!("crop selection fell outside the surface; discarding");
            return Ok(CropOutcome::Discarded);
        };

        let decoded = current.decode()?;
        let cropped = geometry::crop_to_rect(&decoded, native)?;
        let snapshot = RasterSnapshot::from_image(&cropped)?;
        self.session.commit(snapshot);
        tracing::debug!(
            x = native.x,
            y = native.y,
            width = native.width,
            height = native.height,
            "crop applied"
        );
        Ok(outcome)
    }

    /// Render the current snapshot at display size, if any
    ///
    /// # Errors
    /// Returns an error if the snapshot fails to decode.
    pub fn render_display(&self) -> Result<Option<RgbaImage>> {
        let Some(current) = self.session.current() else {
            return Ok(None);
        };
        let decoded = current.decode()?;
        let (w, h) = self.viewport.fit_size(decoded.width(), decoded.height());
        Ok(Some(geometry::resize_to(&decoded, w, h)))
    }

    // ------------------------------------------------------------------
    // Camera

    #[must_use]
    pub fn camera_active(&self) -> bool {
        self.camera.is_some()
    }

    /// Open a camera, replacing any camera already open
    ///
    /// # Errors
    /// Returns the device's acquisition error unchanged.
    pub async fn open_camera(&mut self, source: Box<dyn FrameSource>) -> Result<()> {
        if let Some(camera) = self.camera.take() {
            camera.stop();
        }
        self.camera = Some(CameraSession::start(source).await?);
        Ok(())
    }

    /// Release the camera if one is open
    pub fn close_camera(&mut self) {
        if let Some(camera) = self.camera.take() {
            camera.stop();
        }
    }

    /// Capture a still frame and load it as a brand-new session
    ///
    /// # Errors
    /// Returns [`EditorError::Camera`] when no camera is open, or the
    /// capture error otherwise.
    pub async fn capture_from_camera(&mut self) -> Result<()> {
        let Some(camera) = self.camera.as_mut() else {
            return Err(EditorError::camera("No active camera"));
        };
        let frame = camera.capture().await?.decode()?;
        self.load_image(&frame, LoadSource::Camera)
    }

    // ------------------------------------------------------------------
    // Service-backed operations

    fn backend_ref(&self) -> Result<&dyn AiBackend> {
        self.backend
            .as_deref()
            .ok_or_else(|| EditorError::invalid_config("No backend service configured"))
    }

    /// Blur detected faces, returning how many the service found
    ///
    /// `Ok(None)` while no image is loaded. Zero faces is a success:
    /// the image comes back unchanged.
    ///
    /// # Errors
    /// Service and transport failures; the session is untouched.
    pub async fn blur_faces(&mut self) -> Result<Option<u32>> {
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring blur_faces");
            return Ok(None);
        };
        let result = self.backend_ref()?.blur_faces(current).await?;
        self.session.commit(result.snapshot);
        Ok(Some(result.face_count))
    }

    /// Composite an emoji over detected faces
    ///
    /// `Ok(None)` while no image is loaded.
    ///
    /// # Errors
    /// Service and transport failures; the session is untouched.
    pub async fn emoji_faces(&mut self, emoji: EmojiKind) -> Result<Option<u32>> {
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring emoji_faces");
            return Ok(None);
        };
        let result = self.backend_ref()?.emoji_faces(current, emoji).await?;
        self.session.commit(result.snapshot);
        Ok(Some(result.face_count))
    }

    /// Blur the background behind the subject
    ///
    /// `Ok(false)` while no image is loaded.
    ///
    /// # Errors
    /// Service and transport failures; the session is untouched.
    pub async fn blur_background(&mut self) -> Result<bool> {
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring blur_background");
            return Ok(false);
        };
        let snapshot = self.backend_ref()?.blur_background(current).await?;
        self.session.commit(snapshot);
        Ok(true)
    }

    /// Replace the background with a flat `#rrggbb` color
    ///
    /// `Ok(false)` while no image is loaded.
    ///
    /// # Errors
    /// Rejects a malformed color without calling the service; service
    /// and transport failures leave the session untouched.
    pub async fn change_background(&mut self, bg_color: &str) -> Result<bool> {
        draw::parse_hex_color(bg_color)?;
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring change_background");
            return Ok(false);
        };
        let snapshot = self
            .backend_ref()?
            .change_background(current, bg_color)
            .await?;
        self.session.commit(snapshot);
        Ok(true)
    }

    /// Cut out the subject, leaving transparency behind it
    ///
    /// `Ok(false)` while no image is loaded.
    ///
    /// # Errors
    /// Service and transport failures; the session is untouched.
    pub async fn remove_background(&mut self) -> Result<bool> {
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring remove_background");
            return Ok(false);
        };
        let snapshot = self.backend_ref()?.remove_background(current).await?;
        self.session.commit(snapshot);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Export & gallery

    /// Export the current image into `dir` and append it to the gallery
    ///
    /// The file name is time-stamped; the gallery copy is always PNG
    /// regardless of the export format. `Ok(None)` while no image is
    /// loaded.
    ///
    /// # Errors
    /// Returns an error if encoding or writing fails; the gallery is
    /// only updated after a successful write.
    pub fn export_to_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<Option<PathBuf>> {
        let Some(current) = self.session.current() else {
            tracing::debug!("no image loaded; ignoring export");
            return Ok(None);
        };
        let path = ExportService::export_snapshot(
            current,
            dir.as_ref(),
            self.config.export_format,
            self.config.jpeg_quality,
        )?;
        let saved = current.clone();
        self.gallery.add(saved);
        Ok(Some(path))
    }

    /// Restore a gallery entry into the session as a new edit
    ///
    /// Returns `Ok(false)` for an unknown id.
    ///
    /// # Errors
    /// Returns an error if the stored snapshot fails to decode.
    pub fn load_gallery_entry(&mut self, id: u64) -> Result<bool> {
        let Some(entry) = self.gallery.get(id) else {
            return Ok(false);
        };
        let image = entry.snapshot().decode()?;
        self.session
            .load_image(&image, LoadSource::Gallery, &self.viewport)?;
        self.pencil.stroke = None;
        self.crop.cancel_drag();
        Ok(true)
    }

    /// Delete a gallery entry, reporting whether it existed
    pub fn remove_gallery_entry(&mut self, id: u64) -> bool {
        self.gallery.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockAiBackend;
    use crate::camera::StaticFrameSource;
    use image::Rgba;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default()).unwrap()
    }

    fn solid(width: u32, height: u32, tag: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([tag, tag, tag, 255]))
    }

    fn loaded_editor(width: u32, height: u32) -> Editor {
        let mut editor = editor();
        editor
            .load_image(&solid(width, height, 100), LoadSource::Upload)
            .unwrap();
        editor
    }

    #[test]
    fn test_ops_without_image_are_silent_noops() {
        let mut editor = editor();
        editor.grayscale().unwrap();
        editor.blur().unwrap();
        editor.apply_tone(Tone::Summer).unwrap();
        editor.crop_center().unwrap();
        assert!(!editor.has_image());
        assert!(!editor.undo());
    }

    #[test]
    fn test_filter_then_undo_restores_pixels() {
        let mut editor = loaded_editor(8, 8);
        let before = editor.current_snapshot().unwrap().clone();

        editor.grayscale().unwrap();
        assert_ne!(editor.current_snapshot(), Some(&before));
        assert!(editor.undo());
        assert_eq!(editor.current_snapshot(), Some(&before));
        assert!(editor.redo());
        assert_ne!(editor.current_snapshot(), Some(&before));
    }

    #[test]
    fn test_rotate_swaps_dimensions_without_refit() {
        let mut editor = loaded_editor(100, 60);
        editor.rotate90().unwrap();
        assert_eq!(editor.current_snapshot().unwrap().dimensions(), (60, 100));
    }

    #[test]
    fn test_zoom_rejects_bad_factor_without_mutation() {
        let mut editor = loaded_editor(100, 60);
        let before = editor.current_snapshot().unwrap().clone();

        assert!(editor.zoom(0.0).is_err());
        assert!(editor.zoom(f64::NAN).is_err());
        assert_eq!(editor.current_snapshot(), Some(&before));
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_pencil_requires_image_and_excludes_crop() {
        let mut editor = editor();
        assert!(!editor.enable_pencil());

        editor
            .load_image(&solid(50, 50, 1), LoadSource::Upload)
            .unwrap();
        assert!(editor.enable_crop());
        assert!(editor.enable_pencil());
        assert!(!editor.crop_enabled());

        assert!(editor.enable_crop());
        assert!(!editor.pencil_enabled());
    }

    #[test]
    fn test_stroke_commits_once() {
        let mut editor = loaded_editor(50, 50);
        assert!(editor.enable_pencil());
        editor.set_pencil_color([255, 0, 0]);

        assert!(editor.begin_stroke(10.0, 10.0).unwrap());
        assert!(editor.extend_stroke(30.0, 10.0).is_some());
        assert!(editor.extend_stroke(30.0, 30.0).is_some());
        // Nothing committed until the stroke ends.
        assert!(!editor.can_undo());

        assert!(editor.end_stroke().unwrap());
        assert!(editor.can_undo());

        let painted = editor.current_snapshot().unwrap().decode().unwrap();
        assert_eq!(painted.get_pixel(20, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_stroke_without_pencil_is_ignored() {
        let mut editor = loaded_editor(50, 50);
        assert!(!editor.begin_stroke(10.0, 10.0).unwrap());
        assert!(editor.extend_stroke(20.0, 20.0).is_none());
        assert!(!editor.end_stroke().unwrap());
    }

    #[test]
    fn test_set_pencil_width_validates() {
        let mut editor = editor();
        assert!(editor.set_pencil_width(6.0).is_ok());
        assert!(editor.set_pencil_width(0.0).is_err());
        assert!(editor.set_pencil_width(f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn test_backend_ops_without_image_are_noops() {
        let mut editor = editor();
        editor.set_backend(Box::new(MockAiBackend::new()));

        assert_eq!(editor.blur_faces().await.unwrap(), None);
        assert!(!editor.blur_background().await.unwrap());
        assert!(!editor.has_image());
    }

    #[tokio::test]
    async fn test_backend_ops_require_backend() {
        let mut editor = loaded_editor(10, 10);
        let err = editor.blur_faces().await.unwrap_err();
        assert!(matches!(err, EditorError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_backend_result_becomes_new_edit() {
        let mut editor = loaded_editor(10, 10);
        let before = editor.current_snapshot().unwrap().clone();
        editor.set_backend(Box::new(MockAiBackend::new().with_face_count(2)));

        let faces = editor.blur_faces().await.unwrap();
        assert_eq!(faces, Some(2));
        assert!(editor.can_undo());
        assert!(editor.undo());
        assert_eq!(editor.current_snapshot(), Some(&before));
    }

    #[tokio::test]
    async fn test_failed_backend_call_leaves_state() {
        let mut editor = loaded_editor(10, 10);
        let before = editor.current_snapshot().unwrap().clone();
        editor.set_backend(Box::new(MockAiBackend::new_failing()));

        assert!(editor.remove_background().await.is_err());
        assert_eq!(editor.current_snapshot(), Some(&before));
        assert!(!editor.can_undo());
    }

    #[tokio::test]
    async fn test_change_background_validates_color_first() {
        let mut editor = loaded_editor(10, 10);
        let mock = MockAiBackend::new();
        let history = mock.clone();
        editor.set_backend(Box::new(mock));

        assert!(editor.change_background("not-a-color").await.is_err());
        assert!(history.get_call_history().is_empty());

        assert!(editor.change_background("#336699").await.unwrap());
        assert_eq!(
            history.get_call_history(),
            vec!["change_background:#336699"]
        );
    }

    #[tokio::test]
    async fn test_capture_without_camera_is_camera_error() {
        let mut editor = editor();
        let err = editor.capture_from_camera().await.unwrap_err();
        assert!(matches!(err, EditorError::Camera(_)));
    }

    #[tokio::test]
    async fn test_camera_capture_starts_new_session() {
        let mut editor = loaded_editor(10, 10);
        editor.grayscale().unwrap();
        assert!(editor.can_undo());

        let source = StaticFrameSource::new(solid(64, 48, 7));
        editor.open_camera(Box::new(source)).await.unwrap();
        editor.capture_from_camera().await.unwrap();

        assert_eq!(editor.current_snapshot().unwrap().dimensions(), (64, 48));
        // Brand-new session: the pre-capture history is gone.
        assert!(!editor.can_undo());
        editor.close_camera();
    }

    #[test]
    fn test_show_original_after_edits() {
        let mut editor = loaded_editor(20, 20);
        let original = editor.current_snapshot().unwrap().clone();

        editor.grayscale().unwrap();
        editor.brighten().unwrap();
        assert!(editor.show_original());
        assert_eq!(editor.current_snapshot(), Some(&original));
        // Showing the original is itself an edit.
        assert!(editor.can_undo());
    }

    #[test]
    fn test_crop_commit_at_scale_one() {
        let mut editor = loaded_editor(200, 150);
        assert!(editor.enable_crop());
        assert!(editor.begin_crop_drag(20.0, 10.0));
        let preview = editor.update_crop_drag(120.0, 90.0).unwrap();
        assert!(preview.is_some());

        match editor.finish_crop_drag().unwrap() {
            CropOutcome::Committed(_) => {}
            other => panic!("expected commit, got {other:?}"),
        }
        assert_eq!(editor.current_snapshot().unwrap().dimensions(), (100, 80));
        assert!(!editor.crop_enabled());
    }

    #[test]
    fn test_small_crop_drag_leaves_pixels_identical() {
        let mut editor = loaded_editor(200, 150);
        let before = editor.current_snapshot().unwrap().clone();

        assert!(editor.enable_crop());
        editor.begin_crop_drag(20.0, 10.0);
        editor.update_crop_drag(25.0, 90.0).unwrap();
        assert_eq!(editor.finish_crop_drag().unwrap(), CropOutcome::Discarded);

        assert_eq!(editor.current_snapshot(), Some(&before));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_export_and_gallery_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = loaded_editor(30, 20);

        let path = editor.export_to_dir(dir.path()).unwrap().unwrap();
        assert!(path.exists());
        assert_eq!(editor.gallery().len(), 1);

        editor.grayscale().unwrap();
        let id = editor.gallery().iter().next().unwrap().id();
        assert!(editor.load_gallery_entry(id).unwrap());
        assert_eq!(editor.current_snapshot().unwrap().dimensions(), (30, 20));
        // Restoring from the gallery keeps the session history.
        assert!(editor.can_undo());

        assert!(editor.remove_gallery_entry(id));
        assert!(!editor.load_gallery_entry(id).unwrap());
    }

    #[test]
    fn test_export_without_image_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor();
        assert!(editor.export_to_dir(dir.path()).unwrap().is_none());
        assert!(editor.gallery().is_empty());
    }
}
