//! Core value types shared across the editing engine

use crate::config::ExportFormat;
use crate::error::{EditorError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Losslessly encoded raster snapshot
///
/// The engine's unit of history: every completed edit produces a new
/// snapshot, and undo/redo swaps whole snapshots rather than replaying
/// operations. Stored as PNG bytes plus dimensions so history entries stay
/// compact and comparable without decoding.
///
/// Snapshots are immutable once constructed. Transform code decodes to an
/// [`RgbaImage`], mutates pixels, and encodes a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    png_data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterSnapshot {
    /// Encode an RGBA pixel buffer into a snapshot
    ///
    /// # Errors
    /// Returns an error if PNG encoding fails.
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let mut png_data = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .map_err(|e| EditorError::processing_stage_error("snapshot encode", e))?;
        Ok(Self {
            png_data,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Build a snapshot from PNG bytes, validating them by decoding the header
    ///
    /// # Errors
    /// Returns an error if the bytes are not a decodable PNG.
    pub fn from_png_bytes(png_data: Vec<u8>) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(&png_data, ImageFormat::Png)?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            png_data,
        })
    }

    /// Decode the snapshot back into an RGBA pixel buffer
    ///
    /// # Errors
    /// Returns an error if the stored bytes fail to decode, which indicates
    /// an internal invariant violation since construction validated them.
    pub fn decode(&self) -> Result<RgbaImage> {
        let decoded = image::load_from_memory_with_format(&self.png_data, ImageFormat::Png)?;
        Ok(decoded.to_rgba8())
    }

    /// Snapshot width in native pixels
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Snapshot height in native pixels
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in native pixels
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Borrow the encoded PNG payload
    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png_data
    }

    /// Consume the snapshot, returning the encoded PNG payload
    #[must_use]
    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png_data
    }

    /// Approximate in-memory footprint of the snapshot in bytes
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.png_data.len()
    }

    /// Encode to the requested export format
    ///
    /// PNG returns the stored payload unchanged. JPEG re-encodes through an
    /// opaque RGB buffer at the given quality, discarding alpha.
    ///
    /// # Errors
    /// Returns an error if decoding or re-encoding fails.
    pub fn to_bytes(&self, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Png => Ok(self.png_data.clone()),
            ExportFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(self.decode()?).to_rgb8();
                let mut buf = Vec::new();
                let mut cursor = Cursor::new(&mut buf);
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, jpeg_quality);
                rgb.write_with_encoder(encoder)
                    .map_err(|e| EditorError::processing_stage_error("jpeg encode", e))?;
                Ok(buf)
            },
        }
    }

    /// Write the snapshot to disk as PNG
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.png_data)
            .map_err(|e| EditorError::file_io_error("write PNG output", path, &e))
    }

    /// Write the snapshot to disk as JPEG at the given quality
    ///
    /// # Errors
    /// Returns an error if re-encoding or writing fails.
    pub fn save_jpeg<P: AsRef<Path>>(&self, path: P, quality: u8) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(ExportFormat::Jpeg, quality)?;
        std::fs::write(path, bytes)
            .map_err(|e| EditorError::file_io_error("write JPEG output", path, &e))
    }
}
