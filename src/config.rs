//! Configuration types for the editing engine

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};

/// Encoding used when exporting the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless PNG, preserves alpha
    Png,
    /// Lossy JPEG, alpha flattened
    Jpeg,
}

impl ExportFormat {
    /// File extension for the format (no leading dot)
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// MIME type for the format
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// Configuration for an editing session controller
///
/// Controls the display container the viewport fits images into, history
/// retention, crop input thresholds, and export encoding. Construct via
/// [`EditorConfig::builder`] or use [`Default`] for the standard editor
/// surface (960x720 container, 50 history entries, 10px drag threshold).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum display width the viewport may use, in pixels
    pub container_width: u32,
    /// Maximum display height the viewport may use, in pixels
    pub container_height: u32,
    /// Maximum number of retained undo entries; oldest evicted beyond this
    pub history_limit: usize,
    /// Minimum pointer travel, per axis, for a crop drag to commit
    pub min_crop_drag_px: u32,
    /// Encoding used by export operations
    pub export_format: ExportFormat,
    /// JPEG quality (0-100) when exporting as JPEG
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container_width: 960,
            container_height: 720,
            history_limit: 50,
            min_crop_drag_px: 10,
            export_format: ExportFormat::default(),
            jpeg_quality: 92,
        }
    }
}

impl EditorConfig {
    /// Start building a configuration from the defaults
    #[must_use]
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder::default()
    }

    /// Validate configuration values
    ///
    /// # Errors
    /// Returns [`EditorError::InvalidConfig`] when a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.container_width == 0 || self.container_height == 0 {
            return Err(EditorError::config_value_error(
                "container dimensions",
                format!("{}x{}", self.container_width, self.container_height),
                "at least 1x1",
            ));
        }
        if self.history_limit == 0 {
            return Err(EditorError::config_value_error(
                "history_limit",
                self.history_limit,
                "at least 1",
            ));
        }
        if self.min_crop_drag_px == 0 {
            return Err(EditorError::config_value_error(
                "min_crop_drag_px",
                self.min_crop_drag_px,
                "at least 1",
            ));
        }
        if self.jpeg_quality > 100 {
            return Err(EditorError::config_value_error(
                "jpeg_quality",
                self.jpeg_quality,
                "0-100",
            ));
        }
        Ok(())
    }
}

/// Builder for [`EditorConfig`]
#[derive(Debug, Clone, Default)]
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    /// Set the display container bound the viewport fits images into
    #[must_use]
    pub fn container_size(mut self, width: u32, height: u32) -> Self {
        self.config.container_width = width;
        self.config.container_height = height;
        self
    }

    /// Set the maximum number of retained undo entries
    #[must_use]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Set the minimum per-axis pointer travel for a crop drag to commit
    #[must_use]
    pub fn min_crop_drag_px(mut self, threshold: u32) -> Self {
        self.config.min_crop_drag_px = threshold;
        self
    }

    /// Set the export encoding
    #[must_use]
    pub fn export_format(mut self, format: ExportFormat) -> Self {
        self.config.export_format = format;
        self
    }

    /// Set the JPEG export quality (0-100)
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    /// Finish building, validating the result
    ///
    /// # Errors
    /// Returns [`EditorError::InvalidConfig`] when a value is out of range.
    pub fn build(self) -> Result<EditorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
