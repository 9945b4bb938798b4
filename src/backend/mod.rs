//! Processing service backends
//!
//! Face and background operations run on a companion service rather
//! than in-process. [`AiBackend`] abstracts that service so controllers
//! can be exercised against a mock; [`HttpAiBackend`] is the JSON-over-
//! HTTP implementation used in production.

pub mod http;
pub mod test_utils;
pub mod wire;

pub use self::http::HttpAiBackend;
pub use self::test_utils::MockAiBackend;

use crate::error::{EditorError, Result};
use crate::types::RasterSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Emoji overlays the service can composite over detected faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiKind {
    #[default]
    Smile,
    Heart,
    Star,
    Cool,
}

impl EmojiKind {
    /// All known emoji kinds
    pub const ALL: [Self; 4] = [Self::Smile, Self::Heart, Self::Star, Self::Cool];

    /// Wire name of the emoji
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Heart => "heart",
            Self::Star => "star",
            Self::Cool => "cool",
        }
    }
}

impl std::fmt::Display for EmojiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmojiKind {
    type Err = EditorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smile" => Ok(Self::Smile),
            "heart" => Ok(Self::Heart),
            "star" => Ok(Self::Star),
            "cool" => Ok(Self::Cool),
            other => Err(EditorError::config_value_error(
                "emoji",
                other,
                "one of: smile, heart, star, cool",
            )),
        }
    }
}

/// Image result from a face-detection endpoint
///
/// When no faces are found the service returns the input unchanged with
/// a count of zero; that is a success, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImageResult {
    pub snapshot: RasterSnapshot,
    pub face_count: u32,
}

/// Outcome of enrolling a face reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollOutcome {
    pub success: bool,
    pub message: String,
}

/// Outcome of a face verification round trip
///
/// `username` is the service's placeholder `"unknown"` on every
/// unsuccessful verification; interpreting it is the verify
/// controller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub success: bool,
    pub username: String,
    pub message: String,
}

/// Interface to the companion processing service
///
/// Implementations never mutate editor state; callers decide whether a
/// returned image becomes the new working snapshot. Transport failures
/// surface as [`crate::error::EditorError::Network`], failures the
/// service reports in its reply body as
/// [`crate::error::EditorError::Backend`].
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Blur every detected face
    async fn blur_faces(&self, image: &RasterSnapshot) -> Result<FaceImageResult>;

    /// Composite an emoji over every detected face
    async fn emoji_faces(&self, image: &RasterSnapshot, emoji: EmojiKind)
        -> Result<FaceImageResult>;

    /// Blur everything that is not the foreground subject
    async fn blur_background(&self, image: &RasterSnapshot) -> Result<RasterSnapshot>;

    /// Replace the background with a flat `#rrggbb` color
    async fn change_background(
        &self,
        image: &RasterSnapshot,
        bg_color: &str,
    ) -> Result<RasterSnapshot>;

    /// Cut out the foreground subject, returning transparency behind it
    async fn remove_background(&self, image: &RasterSnapshot) -> Result<RasterSnapshot>;

    /// Store the image as the face reference for later verification
    async fn save_face_reference(&self, image: &RasterSnapshot) -> Result<EnrollOutcome>;

    /// Compare the image against the stored face reference
    async fn verify_face(&self, image: &RasterSnapshot) -> Result<VerifyOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_wire_names() {
        assert_eq!(EmojiKind::Smile.as_str(), "smile");
        assert_eq!(EmojiKind::Cool.as_str(), "cool");
        assert_eq!(EmojiKind::default(), EmojiKind::Smile);
    }

    #[test]
    fn test_emoji_parse() {
        assert_eq!("heart".parse::<EmojiKind>().unwrap(), EmojiKind::Heart);
        assert_eq!("STAR".parse::<EmojiKind>().unwrap(), EmojiKind::Star);
        assert!("wink".parse::<EmojiKind>().is_err());
    }

    #[test]
    fn test_emoji_serde_lowercase() {
        let json = serde_json::to_string(&EmojiKind::Heart).unwrap();
        assert_eq!(json, "\"heart\"");
        let parsed: EmojiKind = serde_json::from_str("\"cool\"").unwrap();
        assert_eq!(parsed, EmojiKind::Cool);
    }
}
