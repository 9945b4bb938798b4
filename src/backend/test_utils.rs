//! Test utilities and mock backends
//!
//! Mock implementation of the [`AiBackend`] trait so controllers and
//! workflows can be exercised without a running processing service.

use super::{AiBackend, EmojiKind, EnrollOutcome, FaceImageResult, VerifyOutcome};
use crate::error::{EditorError, Result};
use crate::types::RasterSnapshot;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock processing service
///
/// Echoes the input image back by default; every knob has a consuming
/// modifier so tests configure only what they assert on.
#[derive(Debug, Clone)]
pub struct MockAiBackend {
    /// Call history for verification in tests
    call_history: Arc<Mutex<Vec<String>>>,
    /// Whether every call should fail with a backend error
    should_fail: bool,
    /// Face count reported by the face endpoints
    face_count: u32,
    /// Identity returned by verification; `None` verifies as unknown
    verify_username: Option<String>,
    /// Fixed result image; `None` echoes the input back
    result_image: Option<RasterSnapshot>,
}

impl MockAiBackend {
    /// Create a mock that succeeds and echoes inputs
    #[must_use]
    pub fn new() -> Self {
        Self {
            call_history: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            face_count: 1,
            verify_username: None,
            result_image: None,
        }
    }

    /// Create a mock whose every call fails with a backend error
    #[must_use]
    pub fn new_failing() -> Self {
        let mut backend = Self::new();
        backend.should_fail = true;
        backend
    }

    /// Report the given face count from the face endpoints
    #[must_use]
    pub fn with_face_count(mut self, count: u32) -> Self {
        self.face_count = count;
        self
    }

    /// Verify successfully as the given identity
    #[must_use]
    pub fn with_verify_username(mut self, username: impl Into<String>) -> Self {
        self.verify_username = Some(username.into());
        self
    }

    /// Return this image from every image-producing call
    #[must_use]
    pub fn with_result_image(mut self, snapshot: RasterSnapshot) -> Self {
        self.result_image = Some(snapshot);
        self
    }

    /// Get the call history for verification in tests
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Clear the call history
    pub fn clear_call_history(&self) {
        self.call_history.lock().unwrap().clear();
    }

    /// Record a method call for testing verification
    fn record_call(&self, method: &str) {
        if let Ok(mut history) = self.call_history.lock() {
            history.push(method.to_string());
        }
    }

    fn check_failure(&self) -> Result<()> {
        if self.should_fail {
            return Err(EditorError::backend("Mock backend failure"));
        }
        Ok(())
    }

    fn result_for(&self, input: &RasterSnapshot) -> RasterSnapshot {
        self.result_image
            .clone()
            .unwrap_or_else(|| input.clone())
    }
}

impl Default for MockAiBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiBackend for MockAiBackend {
    async fn blur_faces(&self, image: &RasterSnapshot) -> Result<FaceImageResult> {
        self.record_call("blur_faces");
        self.check_failure()?;
        Ok(FaceImageResult {
            snapshot: self.result_for(image),
            face_count: self.face_count,
        })
    }

    async fn emoji_faces(
        &self,
        image: &RasterSnapshot,
        emoji: EmojiKind,
    ) -> Result<FaceImageResult> {
        self.record_call(&format!("emoji_faces:{emoji}"));
        self.check_failure()?;
        Ok(FaceImageResult {
            snapshot: self.result_for(image),
            face_count: self.face_count,
        })
    }

    async fn blur_background(&self, image: &RasterSnapshot) -> Result<RasterSnapshot> {
        self.record_call("blur_background");
        self.check_failure()?;
        Ok(self.result_for(image))
    }

    async fn change_background(
        &self,
        image: &RasterSnapshot,
        bg_color: &str,
    ) -> Result<RasterSnapshot> {
        self.record_call(&format!("change_background:{bg_color}"));
        self.check_failure()?;
        Ok(self.result_for(image))
    }

    async fn remove_background(&self, image: &RasterSnapshot) -> Result<RasterSnapshot> {
        self.record_call("remove_background");
        self.check_failure()?;
        Ok(self.result_for(image))
    }

    async fn save_face_reference(&self, _image: &RasterSnapshot) -> Result<EnrollOutcome> {
        self.record_call("save_face_reference");
        self.check_failure()?;
        Ok(EnrollOutcome {
            success: true,
            message: "Face reference saved".to_string(),
        })
    }

    async fn verify_face(&self, _image: &RasterSnapshot) -> Result<VerifyOutcome> {
        self.record_call("verify_face");
        self.check_failure()?;
        Ok(match &self.verify_username {
            Some(username) => VerifyOutcome {
                success: true,
                username: username.clone(),
                message: "Face verified".to_string(),
            },
            None => VerifyOutcome {
                success: false,
                username: "unknown".to_string(),
                message: "Face does not match".to_string(),
            },
        })
    }
}

/// Helper functions for creating test images and snapshots
pub mod test_helpers {
    use crate::types::RasterSnapshot;
    use image::{Rgba, RgbaImage};

    /// Create a test image with a simple gradient pattern
    #[must_use]
    pub fn create_test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            Rgba([r, g, 128, 255])
        })
    }

    /// Create a gradient snapshot with the given dimensions
    #[must_use]
    pub fn create_test_snapshot(width: u32, height: u32) -> RasterSnapshot {
        RasterSnapshot::from_image(&create_test_image(width, height))
            .expect("test image encodes")
    }
}
