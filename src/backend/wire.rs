//! JSON wire format for the processing service
//!
//! Every request carries the working image as a base64 PNG data URL in
//! an `image` field; replies carry either a result `image` data URL or
//! an `error`/`message` string. The service encodes operation failures
//! in the reply body, so reply shapes keep every field optional where
//! the service omits it.

use crate::error::{EditorError, Result};
use crate::types::RasterSnapshot;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Request carrying only the image
#[derive(Debug, Serialize)]
pub struct ImagePayload {
    pub image: String,
}

/// Request for the emoji overlay endpoint
#[derive(Debug, Serialize)]
pub struct EmojiRequest {
    pub image: String,
    pub emoji: String,
}

/// Request for the background recolor endpoint
#[derive(Debug, Serialize)]
pub struct RecolorRequest {
    pub image: String,
    pub bg_color: String,
}

/// Reply shape shared by the image-producing endpoints
///
/// `faces` is only present on the face-detection endpoints; `error`
/// and `image` are mutually exclusive in practice but the shape does
/// not enforce it.
#[derive(Debug, Deserialize)]
pub struct ImageReply {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub faces: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply from the save-reference endpoint
#[derive(Debug, Deserialize)]
pub struct EnrollReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Reply from the verify endpoint
#[derive(Debug, Deserialize)]
pub struct VerifyReply {
    pub success: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub message: String,
}

/// Encode a snapshot as a PNG data URL
#[must_use]
pub fn encode_data_url(snapshot: &RasterSnapshot) -> String {
    format!("{DATA_URL_PREFIX}{}", STANDARD.encode(snapshot.png_bytes()))
}

/// Decode a data URL back into a snapshot
///
/// The header up to the first comma is informational and ignored; only
/// the base64 payload after it is parsed. A bare base64 string without
/// a header is accepted too.
pub fn decode_data_url(data_url: &str) -> Result<RasterSnapshot> {
    let payload = data_url
        .split_once(',')
        .map_or(data_url, |(_, payload)| payload);
    let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
        EditorError::backend(format!("service returned undecodable image data: {e}"))
    })?;
    RasterSnapshot::from_png_bytes(bytes)
        .map_err(|e| EditorError::backend(format!("service returned an invalid image: {e}")))
}
