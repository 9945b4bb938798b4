//! Snapshot export service
//!
//! Writes the current snapshot to disk under a time-stamped file name,
//! mirroring what a browser download of the edited photo would produce.

use crate::config::ExportFormat;
use crate::error::{EditorError, Result};
use crate::types::RasterSnapshot;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Prefix of generated export file names
const EXPORT_FILE_PREFIX: &str = "photo-editor";

/// Service for exporting snapshots to the filesystem
pub struct ExportService;

impl ExportService {
    /// File name for an export at the given moment
    ///
    /// Names look like `photo-editor-1700000000123.png`; the number is
    /// the Unix timestamp in milliseconds, so lexical order is save
    /// order.
    #[must_use]
    pub fn file_name(format: ExportFormat, timestamp: DateTime<Utc>) -> String {
        format!(
            "{}-{}.{}",
            EXPORT_FILE_PREFIX,
            timestamp.timestamp_millis(),
            format.extension()
        )
    }

    /// Write a snapshot to an exact path in the given format
    ///
    /// # Errors
    /// Returns an error if encoding or the write fails.
    pub fn write_snapshot(
        snapshot: &RasterSnapshot,
        path: &Path,
        format: ExportFormat,
        jpeg_quality: u8,
    ) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    EditorError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }
        match format {
            ExportFormat::Png => snapshot.save_png(path),
            ExportFormat::Jpeg => snapshot.save_jpeg(path, jpeg_quality),
        }
    }

    /// Export a snapshot into `dir` under a fresh time-stamped name
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the
    /// write fails.
    pub fn export_snapshot(
        snapshot: &RasterSnapshot,
        dir: &Path,
        format: ExportFormat,
        jpeg_quality: u8,
    ) -> Result<PathBuf> {
        let path = dir.join(Self::file_name(format, Utc::now()));
        Self::write_snapshot(snapshot, &path, format, jpeg_quality)?;
        log::info!(
            "Exported {}x{} snapshot to {}",
            snapshot.width(),
            snapshot.height(),
            path.display()
        );
        Ok(path)
    }
}
