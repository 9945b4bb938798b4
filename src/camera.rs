//! Camera capture sessions
//!
//! The engine is headless, so live devices are reached through the
//! [`FrameSource`] trait supplied by the host. A [`CameraSession`] owns
//! one source exclusively: acquisition happens in `start`, stills come
//! from `capture`, and `stop` releases the device. Dropping a session
//! without stopping it is logged as a leak.

use crate::error::{EditorError, Result};
use crate::types::RasterSnapshot;
use async_trait::async_trait;
use image::RgbaImage;

/// A live capture device
///
/// `open` acquires the device and may fail (permission denied, device
/// busy); the other methods are only called between a successful `open`
/// and `release`.
#[async_trait]
pub trait FrameSource: Send {
    /// Acquire the underlying device
    async fn open(&mut self) -> Result<()>;

    /// Native feed resolution as `(width, height)`
    fn resolution(&self) -> (u32, u32);

    /// Grab one still frame at native feed resolution
    async fn capture_frame(&mut self) -> Result<RgbaImage>;

    /// Release the underlying device
    fn release(&mut self);
}

/// Exclusive ownership of one open frame source
pub struct CameraSession {
    source: Box<dyn FrameSource>,
    released: bool,
}

impl CameraSession {
    /// Open the source and start a session
    ///
    /// # Errors
    /// Returns the source's acquisition error unchanged; no session
    /// exists on failure.
    pub async fn start(mut source: Box<dyn FrameSource>) -> Result<Self> {
        source.open().await?;
        tracing::debug!("camera session started");
        Ok(Self {
            source,
            released: false,
        })
    }

    /// Native feed resolution as `(width, height)`
    #[must_use]
    pub fn resolution(&self) -> (u32, u32) {
        self.source.resolution()
    }

    /// Capture one still frame as a snapshot at native feed resolution
    ///
    /// # Errors
    /// Returns an error if the source fails to produce a frame or the
    /// frame fails to encode.
    pub async fn capture(&mut self) -> Result<RasterSnapshot> {
        let frame = self.source.capture_frame().await?;
        RasterSnapshot::from_image(&frame)
    }

    /// Stop the session, releasing the device
    pub fn stop(mut self) {
        self.source.release();
        self.released = true;
        tracing::debug!("camera session stopped");
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        if !self.released {
            log::warn!("camera session dropped without stop; releasing device");
            self.source.release();
        }
    }
}

/// Frame source that serves one fixed image
///
/// Stands in for a live device in tests and batch runs: every capture
/// returns the same frame.
#[derive(Debug, Clone)]
pub struct StaticFrameSource {
    frame: RgbaImage,
    open_error: Option<String>,
}

impl StaticFrameSource {
    #[must_use]
    pub fn new(frame: RgbaImage) -> Self {
        Self {
            frame,
            open_error: None,
        }
    }

    /// Source whose `open` fails with the given device error text
    #[must_use]
    pub fn failing<S: Into<String>>(message: S) -> Self {
        Self {
            frame: RgbaImage::new(1, 1),
            open_error: Some(message.into()),
        }
    }
}

#[async_trait]
impl FrameSource for StaticFrameSource {
    async fn open(&mut self) -> Result<()> {
        match &self.open_error {
            Some(message) => Err(EditorError::camera(message.clone())),
            None => Ok(()),
        }
    }

    fn resolution(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    async fn capture_frame(&mut self) -> Result<RgbaImage> {
        Ok(self.frame.clone())
    }

    fn release(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[tokio::test]
    async fn test_start_and_capture() {
        let source = StaticFrameSource::new(frame(640, 480));
        let mut session = CameraSession::start(Box::new(source)).await.unwrap();

        assert_eq!(session.resolution(), (640, 480));
        let snap = session.capture().await.unwrap();
        assert_eq!(snap.dimensions(), (640, 480));
        session.stop();
    }

    #[tokio::test]
    async fn test_capture_at_native_resolution() {
        let source = StaticFrameSource::new(frame(1280, 720));
        let mut session = CameraSession::start(Box::new(source)).await.unwrap();
        let snap = session.capture().await.unwrap();
        // No fit-to-container here; sizing is the session loader's job.
        assert_eq!(snap.dimensions(), (1280, 720));
        session.stop();
    }

    #[tokio::test]
    async fn test_failed_open_surfaces_device_error() {
        let source = StaticFrameSource::failing("device busy");
        let result = CameraSession::start(Box::new(source)).await;
        match result {
            Err(e) => assert!(e.to_string().contains("device busy")),
            Ok(_) => panic!("expected acquisition failure"),
        }
    }

    #[tokio::test]
    async fn test_repeated_captures_return_same_frame() {
        let source = StaticFrameSource::new(frame(8, 8));
        let mut session = CameraSession::start(Box::new(source)).await.unwrap();
        let a = session.capture().await.unwrap();
        let b = session.capture().await.unwrap();
        assert_eq!(a, b);
        session.stop();
    }
}
