//! Error types for photo editing session operations

use std::path::Path;
use thiserror::Error;

/// Result type alias for editing operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Comprehensive error type for the editing engine
///
/// Groups failures by where they originate: configuration, local raster
/// processing, the remote AI collaborator, camera devices, and plain I/O.
/// Controllers guarantee that returning any of these leaves session state
/// untouched.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Local raster processing errors (decode, transform, encode)
    #[error("Processing error: {0}")]
    Processing(String),

    /// Backend collaborator rejected the request or returned an error payload
    #[error("Backend service error: {0}")]
    Backend(String),

    /// Transport-level failures talking to the backend collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Camera device acquisition or capture failures
    #[error("Camera error: {0}")]
    Camera(String),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding format errors
    #[error("Image format error: {0}")]
    ImageFormat(#[from] image::ImageError),

    /// Internal invariant violations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EditorError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create a backend service error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a camera error
    pub fn camera<S: Into<String>>(msg: S) -> Self {
        Self::Camera(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a network error with optional source context
    ///
    /// # Arguments
    /// * `context` - Description of the operation that failed
    /// * `source` - Optional underlying error for additional detail
    pub fn network_error(context: &str, source: Option<&dyn std::error::Error>) -> Self {
        match source {
            Some(err) => Self::Network(format!("{context}: {err}")),
            None => Self::Network(context.to_string()),
        }
    }

    /// Create a file I/O error with operation and path context
    ///
    /// Produces messages like `Failed to write output 'out.png': permission
    /// denied` instead of the bare OS error.
    pub fn file_io_error(operation: &str, path: &Path, source: &std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            source.kind(),
            format!("Failed to {operation} '{}': {source}", path.display()),
        ))
    }

    /// Create a processing error tagged with the pipeline stage that failed
    pub fn processing_stage_error(stage: &str, detail: impl std::fmt::Display) -> Self {
        Self::Processing(format!("{stage}: {detail}"))
    }

    /// Create a configuration error for a rejected value
    ///
    /// # Arguments
    /// * `field` - Name of the configuration field
    /// * `value` - The rejected value
    /// * `expected` - Human-readable description of accepted values
    pub fn config_value_error(
        field: &str,
        value: impl std::fmt::Display,
        expected: &str,
    ) -> Self {
        Self::InvalidConfig(format!(
            "Invalid value for {field}: {value} (expected {expected})"
        ))
    }

    /// True when the error came from the backend collaborator rather than
    /// local processing
    #[must_use]
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_messages() {
        let err = EditorError::invalid_config("history limit must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: history limit must be positive"
        );

        let err = EditorError::backend("face detection failed");
        assert_eq!(err.to_string(), "Backend service error: face detection failed");

        let err = EditorError::camera("device busy");
        assert_eq!(err.to_string(), "Camera error: device busy");
    }

    #[test]
    fn test_network_error_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = EditorError::network_error("verify request failed", Some(&io));
        assert_eq!(
            err.to_string(),
            "Network error: verify request failed: timed out"
        );

        let err = EditorError::network_error("verify request failed", None);
        assert_eq!(err.to_string(), "Network error: verify request failed");
    }

    #[test]
    fn test_file_io_error_context() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let path = PathBuf::from("/tmp/missing.png");
        let err = EditorError::file_io_error("read input", &path, &source);
        let msg = err.to_string();
        assert!(msg.contains("read input"));
        assert!(msg.contains("missing.png"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_config_value_error_format() {
        let err = EditorError::config_value_error("jpeg_quality", 150, "0-100");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Invalid value for jpeg_quality: 150 (expected 0-100)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(EditorError::Io(_))));
    }

    #[test]
    fn test_backend_error_classification() {
        assert!(EditorError::backend("x").is_backend_error());
        assert!(EditorError::network_error("x", None).is_backend_error());
        assert!(!EditorError::processing("x").is_backend_error());
    }
}
