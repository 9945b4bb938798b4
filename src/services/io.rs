//! Image file I/O service
//!
//! Keeps filesystem access out of the editor itself so session logic
//! stays testable against in-memory surfaces.

use crate::config::ExportFormat;
use crate::error::{EditorError, Result};
use image::RgbaImage;
use std::path::Path;

/// Service for loading and saving image files
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first and falls back to
    /// sniffing the file content, so a mislabelled `.jpg` that is
    /// really a PNG still loads.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or not a
    /// decodable image.
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(EditorError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img.to_rgba8()),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    EditorError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data)
                    .map(|img| img.to_rgba8())
                    .map_err(|content_err| {
                        let extension = path_ref
                            .extension()
                            .and_then(|s| s.to_str())
                            .unwrap_or("unknown");
                        EditorError::processing_stage_error(
                            "image loading",
                            format!(
                                "Failed to load image with both extension-based ({extension}) and content-based detection. Extension error: {e}. Content error: {content_err}"
                            ),
                        )
                    })
            },
        }
    }

    /// Decode an image from raw bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are not a decodable image.
    pub fn load_from_bytes(bytes: &[u8]) -> Result<RgbaImage> {
        image::load_from_memory(bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| EditorError::processing(format!("Failed to decode image from bytes: {e}")))
    }

    /// Save an image to a file in the given export format
    ///
    /// Parent directories are created as needed. JPEG output flattens
    /// alpha onto opaque RGB at `jpeg_quality`.
    ///
    /// # Errors
    /// Returns an error if directory creation, encoding, or the write
    /// fails.
    pub fn save_image<P: AsRef<Path>>(
        image: &RgbaImage,
        path: P,
        format: ExportFormat,
        jpeg_quality: u8,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    EditorError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        match format {
            ExportFormat::Png => image
                .save_with_format(path_ref, image::ImageFormat::Png)
                .map_err(|e| {
                    EditorError::processing_stage_error(
                        "image save",
                        format!("Failed to save as PNG: {e}"),
                    )
                }),
            ExportFormat::Jpeg => {
                let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                let file = std::fs::File::create(path_ref)
                    .map_err(|e| EditorError::file_io_error("create output file", path_ref, &e))?;
                let mut writer = std::io::BufWriter::new(file);
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
                rgb.write_with_encoder(encoder).map_err(|e| {
                    EditorError::processing_stage_error(
                        "image save",
                        format!("Failed to save as JPEG: {e}"),
                    )
                })
            },
        }
    }

    /// Check whether a path carries a supported image extension
    #[must_use]
    pub fn is_supported_format<P: AsRef<Path>>(path: P) -> bool {
        let path_ref = path.as_ref();

        if let Some(extension) = path_ref.extension() {
            if let Some(ext_str) = extension.to_str() {
                let ext_lower = ext_str.to_lowercase();
                match ext_lower.as_str() {
                    "jpg" | "jpeg" | "png" => true,
                    #[cfg(feature = "webp-support")]
                    "webp" => true,
                    _ => false,
                }
            } else {
                false
            }
        } else {
            false
        }
    }
}
