//! Editing session state
//!
//! Owns the baseline snapshot and the bounded undo/redo history of the
//! image currently being edited. Fresh loads from the user start a new
//! session; completed edits, service results, and gallery restores push
//! onto the history of the session they land in.

use crate::error::Result;
use crate::history::HistoryStack;
use crate::ops::geometry;
use crate::types::RasterSnapshot;
use crate::viewport::Viewport;
use image::RgbaImage;

/// Where a newly loaded image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// File chosen or dropped by the user
    Upload,
    /// Clipboard paste
    Paste,
    /// Still frame captured from the camera
    Camera,
    /// Entry restored from the gallery
    Gallery,
}

impl LoadSource {
    /// Whether loading from this source starts a brand-new session
    ///
    /// Uploads, pastes, and camera captures replace whatever was being
    /// edited. A gallery restore is an ordinary edit of the session it
    /// lands in, so its history survives.
    #[must_use]
    pub fn resets_session(self) -> bool {
        !matches!(self, Self::Gallery)
    }
}

/// Baseline snapshot plus undo/redo history
#[derive(Debug)]
pub struct EditSession {
    original: Option<RasterSnapshot>,
    history: HistoryStack,
}

impl EditSession {
    #[must_use]
    pub fn new(history_limit: usize) -> Self {
        Self {
            original: None,
            history: HistoryStack::new(history_limit),
        }
    }

    /// Bring a decoded image into the session
    ///
    /// The image is resized to fit the viewport (never upscaled) and the
    /// fitted surface becomes the new current snapshot. The first load
    /// of a session also becomes its `original`.
    ///
    /// # Errors
    /// Returns an error if the fitted surface fails to encode. The
    /// session is left unchanged on failure unless the source resets it.
    pub fn load_image(
        &mut self,
        image: &RgbaImage,
        source: LoadSource,
        viewport: &Viewport,
    ) -> Result<()> {
        if source.resets_session() {
            self.clear();
        }
        let (fit_w, fit_h) = viewport.fit_size(image.width(), image.height());
        let fitted = geometry::resize_to(image, fit_w, fit_h);
        let snapshot = RasterSnapshot::from_image(&fitted)?;
        self.commit(snapshot);
        Ok(())
    }

    /// Push a completed edit as the new current snapshot
    ///
    /// Clears the redo history like any other edit. Also records the
    /// snapshot as `original` when the session has none yet.
    pub fn commit(&mut self, snapshot: RasterSnapshot) {
        if self.original.is_none() {
            self.original = Some(snapshot.clone());
        }
        self.history.push(snapshot);
    }

    /// Step back one history entry
    ///
    /// No-op at the first loaded state; the first entry is never undone
    /// away.
    pub fn undo(&mut self) -> Option<&RasterSnapshot> {
        self.history.undo()
    }

    /// Re-apply the most recently undone entry
    pub fn redo(&mut self) -> Option<&RasterSnapshot> {
        self.history.redo()
    }

    /// Snapshot currently displayed, if any
    #[must_use]
    pub fn current(&self) -> Option<&RasterSnapshot> {
        self.history.current()
    }

    /// First snapshot ever loaded into this session
    #[must_use]
    pub fn original(&self) -> Option<&RasterSnapshot> {
        self.original.as_ref()
    }

    /// Re-surface the first-loaded snapshot as a new edit
    ///
    /// Returns `None` (and does nothing) when nothing was ever loaded.
    pub fn show_original(&mut self) -> Option<&RasterSnapshot> {
        let original = self.original.clone()?;
        self.history.push(original);
        self.history.current()
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.history.current().is_some()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// History bookkeeping, for status displays
    #[must_use]
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Drop everything: current, original, both histories
    pub fn clear(&mut self) {
        self.original = None;
        self.history.clear();
    }
}
