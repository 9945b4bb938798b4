//! Face verification controller
//!
//! Drives the identity check flow: open a camera, capture a still,
//! round-trip it to the processing service, and expose the outcome as a
//! status the host can render. The controller never retries and each
//! user action issues exactly one request.

use crate::backend::AiBackend;
use crate::camera::{CameraSession, FrameSource};
use crate::error::{EditorError, Result};
use std::time::Duration;

/// How long a host should wait after a successful verification before
/// navigating to the editor
pub const REDIRECT_DELAY: Duration = Duration::from_millis(800);

/// Observable state of the verification flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    /// No camera is open
    Idle,
    /// Camera is live, awaiting a capture
    Live,
    /// The service recognized the face; navigate after [`REDIRECT_DELAY`]
    Verified { username: String },
    /// The service did not recognize the face
    Unknown,
    /// Device, transport, or decode failure with its raw message
    Error { message: String },
}

/// Verification flow state machine
pub struct VerifyController {
    backend: Box<dyn AiBackend>,
    camera: Option<CameraSession>,
    status: VerifyStatus,
}

impl VerifyController {
    #[must_use]
    pub fn new(backend: Box<dyn AiBackend>) -> Self {
        Self {
            backend,
            camera: None,
            status: VerifyStatus::Idle,
        }
    }

    /// Current flow status
    #[must_use]
    pub fn status(&self) -> &VerifyStatus {
        &self.status
    }

    #[must_use]
    pub fn camera_active(&self) -> bool {
        self.camera.is_some()
    }

    /// Open the camera, replacing any camera already open
    ///
    /// Acquisition failure surfaces the device's raw error text as an
    /// [`VerifyStatus::Error`] status.
    pub async fn start_camera(&mut self, source: Box<dyn FrameSource>) -> &VerifyStatus {
        if let Some(camera) = self.camera.take() {
            camera.stop();
        }
        match CameraSession::start(source).await {
            Ok(camera) => {
                self.camera = Some(camera);
                self.status = VerifyStatus::Live;
            }
            Err(e) => {
                self.status = VerifyStatus::Error {
                    message: e.to_string(),
                };
            }
        }
        &self.status
    }

    /// Release the camera and return to idle
    pub fn stop_camera(&mut self) -> &VerifyStatus {
        if let Some(camera) = self.camera.take() {
            camera.stop();
        }
        self.status = VerifyStatus::Idle;
        &self.status
    }

    /// Capture a still and check it against the stored reference
    ///
    /// Success with a known identity yields [`VerifyStatus::Verified`];
    /// an unsuccessful or placeholder reply yields
    /// [`VerifyStatus::Unknown`]; capture, transport, and decode
    /// failures yield [`VerifyStatus::Error`]. The camera stays live
    /// for another attempt.
    pub async fn verify(&mut self) -> &VerifyStatus {
        let Some(camera) = self.camera.as_mut() else {
            self.status = VerifyStatus::Error {
                message: "No active camera".to_string(),
            };
            return &self.status;
        };

        let snapshot = match camera.capture().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.status = VerifyStatus::Error {
                    message: e.to_string(),
                };
                return &self.status;
            }
        };

        self.status = match self.backend.verify_face(&snapshot).await {
            Ok(outcome) if outcome.success && outcome.username != "unknown" => {
                tracing::info!(username = %outcome.username, "face verified");
                VerifyStatus::Verified {
                    username: outcome.username,
                }
            }
            Ok(_) => VerifyStatus::Unknown,
            Err(e) => VerifyStatus::Error {
                message: e.to_string(),
            },
        };
        &self.status
    }

    /// Capture a still and store it as the face reference
    ///
    /// Returns the service's message whether or not it reports success;
    /// the flow status is left alone.
    ///
    /// # Errors
    /// Returns [`EditorError::Camera`] when no camera is open, or the
    /// capture/transport error otherwise.
    pub async fn enroll_reference(&mut self) -> Result<String> {
        let Some(camera) = self.camera.as_mut() else {
            return Err(EditorError::camera("No active camera"));
        };
        let snapshot = camera.capture().await?;
        let outcome = self.backend.save_face_reference(&snapshot).await?;
        tracing::debug!(success = outcome.success, "face reference enrollment");
        Ok(outcome.message)
    }
}
