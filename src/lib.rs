#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_async)]

//! # SnapEdit Photo Editing Library
//!
//! A headless Rust engine for interactive photo editing with undo/redo history,
//! viewport fitting, local pixel operations, and optional AI face/background
//! operations backed by a remote HTTP service.
//!
//! This consolidated library drives the full editing lifecycle: images are loaded
//! from files, bytes, or a live camera feed, fitted to a display container, edited
//! through filters, tone presets, geometry operations, freehand pencil strokes and
//! drag-to-crop, and finally exported to timestamped files tracked in a session
//! gallery.
//!
//! ## Features
//!
//! - **Edit History**: Bounded undo/redo stack with oldest-first eviction
//! - **Viewport Fitting**: Downscale-only fit of large images into a display container
//! - **Local Operations**: Grayscale, blur, brightness, contrast, rotate, flip, crop, zoom
//! - **Tone Presets**: `Summer`, `Forest`, and `Sunset` channel remaps
//! - **Interactive Tools**: Pencil strokes and dashed-preview crop selection
//! - **AI Service Operations**: Face blur, emoji overlay, background blur/replace/removal
//! - **Camera Capture**: Pluggable frame sources for live capture
//! - **Gallery and Export**: Timestamped PNG/JPEG export with an in-session gallery
//! - **CLI Integration**: Optional command-line interface (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ### Primary API Usage
//!
//! ```rust,no_run
//! use snapedit::{Editor, EditorConfig, ExportFormat, Tone};
//!
//! # fn example() -> snapedit::Result<()> {
//! // Configure the editing surface
//! let config = EditorConfig::builder()
//!     .container_size(960, 720)
//!     .export_format(ExportFormat::Png)
//!     .build()?;
//!
//! // Load a photo and apply edits
//! let mut editor = Editor::new(config)?;
//! editor.load_from_path("input.jpg")?;
//! editor.grayscale()?;
//! editor.apply_tone(Tone::Summer)?;
//! editor.undo();
//!
//! // Export the current state and keep it in the gallery
//! editor.export_to_dir("exports")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### AI Service Operations
//!
//! ```rust,no_run
//! use snapedit::{Editor, EditorConfig, HttpAiBackend};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let backend = HttpAiBackend::new("http://localhost:8000".to_string())?;
//! let mut editor = Editor::with_backend(EditorConfig::default(), Box::new(backend))?;
//! editor.load_from_path("portrait.jpg")?;
//! if let Some(faces) = editor.blur_faces().await? {
//!     println!("Blurred {} face(s)", faces);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! This crate is designed to work seamlessly both as a library and as a CLI application:
//!
//! - **Library Usage**: All core functionality (editing, history, export) is available by default
//! - **CLI Usage**: Enable the `cli` feature for command-line interface and progress reporting
//!
//! ### Feature Flags
//!
//! - `cli` (default): Command-line interface and progress reporting (optional for library usage)
//! - `tracing-json`: JSON-formatted tracing output for log aggregation
//! - `webp-support`: WebP image format support
//!
//! ### Library-Only Usage
//!
//! To use only as a library without CLI dependencies:
//!
//! ```toml
//! [dependencies]
//! snapedit = { version = "0.2", default-features = false }
//! ```

pub mod backend;
pub mod camera;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod crop;
pub mod editor;
pub mod error;
pub mod gallery;
pub mod history;
pub mod ops;
pub mod services;
pub mod session;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;
pub mod verify;
pub mod viewport;

// Internal imports for lib functions
use tokio::io::AsyncRead;

// Public API exports
pub use backend::{
    AiBackend, EmojiKind, EnrollOutcome, FaceImageResult, HttpAiBackend, MockAiBackend,
    VerifyOutcome,
};
pub use camera::{CameraSession, FrameSource, StaticFrameSource};
pub use config::{EditorConfig, EditorConfigBuilder, ExportFormat};
pub use crop::{CropOutcome, CropSelection, CropTool};
pub use editor::Editor;
pub use error::{EditorError, Result};
pub use gallery::{Gallery, GalleryEntry};
pub use history::HistoryStack;
pub use ops::Tone;
pub use services::{ExportService, ImageIOService};
pub use session::{EditSession, LoadSource};
pub use types::RasterSnapshot;
pub use verify::{VerifyController, VerifyStatus, REDIRECT_DELAY};
pub use viewport::{DisplayRect, PixelRect, Viewport};

#[cfg(feature = "cli")]
pub use tracing_config::{
    events, init_cli_tracing, init_library_tracing, spans, TracingConfig, TracingFormat,
};

/// Build an editor with an image loaded from bytes
///
/// This is a convenience constructor for memory-based workflows such as web
/// servers and tests, where the image arrives as a byte buffer rather than a
/// file on disk. The image is decoded, fitted to the configured container, and
/// becomes the first history entry.
///
/// # Arguments
///
/// * `image_bytes` - Raw image data as bytes (JPEG, PNG)
/// * `config` - Configuration for the editing session
///
/// # Returns
///
/// An [`Editor`] with the decoded image loaded as an upload
///
/// # Examples
///
/// ```rust,no_run
/// use snapedit::{load_editor_from_bytes, EditorConfig};
///
/// # fn example(upload_bytes: Vec<u8>) -> snapedit::Result<()> {
/// let mut editor = load_editor_from_bytes(&upload_bytes, EditorConfig::default())?;
/// editor.brighten()?;
/// # Ok(())
/// # }
/// ```
pub fn load_editor_from_bytes(image_bytes: &[u8], config: EditorConfig) -> Result<Editor> {
    let mut editor = Editor::new(config)?;
    editor.load_from_bytes(image_bytes, LoadSource::Upload)?;
    Ok(editor)
}

/// Build an editor with an image loaded from a file path
///
/// Decoding honors the file extension first and falls back to content-based
/// detection for mislabelled files.
///
/// # Arguments
///
/// * `path` - Path to an image file on disk
/// * `config` - Configuration for the editing session
///
/// # Returns
///
/// An [`Editor`] with the decoded image loaded as an upload
///
/// # Examples
///
/// ```rust,no_run
/// use snapedit::{load_editor_from_path, EditorConfig, ExportFormat};
///
/// # fn example() -> snapedit::Result<()> {
/// let config = EditorConfig::builder()
///     .container_size(1280, 960)
///     .export_format(ExportFormat::Jpeg)
///     .build()?;
/// let mut editor = load_editor_from_path("photo.jpg", config)?;
/// editor.rotate90()?;
/// editor.export_to_dir("out")?;
/// # Ok(())
/// # }
/// ```
pub fn load_editor_from_path<P: AsRef<std::path::Path>>(
    path: P,
    config: EditorConfig,
) -> Result<Editor> {
    let mut editor = Editor::new(config)?;
    editor.load_from_path(path)?;
    Ok(editor)
}

/// Build an editor with an image read from an async stream
///
/// This accepts any async readable stream, making it suitable for loading
/// images from network connections, large files, or any other async data
/// source.
///
/// # Arguments
///
/// * `reader` - Any type implementing `AsyncRead + Unpin`
/// * `config` - Configuration for the editing session
///
/// # Returns
///
/// An [`Editor`] with the decoded image loaded as an upload
///
/// # Examples
///
/// ```rust,no_run
/// use snapedit::{load_editor_from_reader, EditorConfig};
/// use tokio::fs::File;
///
/// # async fn example() -> anyhow::Result<()> {
/// let file = File::open("large_photo.jpg").await?;
/// let mut editor = load_editor_from_reader(file, EditorConfig::default()).await?;
/// editor.increase_contrast()?;
/// # Ok(())
/// # }
/// ```
pub async fn load_editor_from_reader<R: AsyncRead + Unpin>(
    mut reader: R,
    config: EditorConfig,
) -> Result<Editor> {
    let mut buffer = Vec::new();
    tokio::io::AsyncReadExt::read_to_end(&mut reader, &mut buffer)
        .await
        .map_err(|e| EditorError::processing(format!("Failed to read from stream: {}", e)))?;

    load_editor_from_bytes(&buffer, config)
}
