//! JSON-over-HTTP client for the processing service
//!
//! The service encodes operation failures in the reply body rather than
//! relying on HTTP status codes alone, so replies are parsed regardless
//! of status and an `error` field wins over the status line.

use super::wire::{self, EmojiRequest, EnrollReply, ImagePayload, ImageReply, RecolorRequest, VerifyReply};
use super::{AiBackend, EmojiKind, EnrollOutcome, FaceImageResult, VerifyOutcome};
use crate::error::{EditorError, Result};
use crate::types::RasterSnapshot;
use async_trait::async_trait;
use instant::Instant;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Per-request timeout; face pipelines can be slow on first call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the companion processing service
pub struct HttpAiBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAiBackend {
    /// Build a client for the service at `base_url`
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EditorError::network_error("Failed to create HTTP client", Some(&e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use a preconfigured client (custom timeout, proxy, TLS setup)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Service base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| EditorError::network_error(&format!("POST {url}"), Some(&e)))?;

        let status = response.status();
        let reply = response.json::<R>().await.map_err(|e| {
            EditorError::backend(format!(
                "service returned a malformed reply (HTTP {status}): {e}"
            ))
        })?;

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            "service round trip in {:?}",
            started.elapsed()
        );
        Ok(reply)
    }

    fn image_from_reply(reply: ImageReply) -> Result<RasterSnapshot> {
        if let Some(error) = reply.error {
            return Err(EditorError::backend(error));
        }
        let data_url = reply
            .image
            .ok_or_else(|| EditorError::backend("service reply contained no image"))?;
        wire::decode_data_url(&data_url)
    }
}

#[async_trait]
impl AiBackend for HttpAiBackend {
    async fn blur_faces(&self, image: &RasterSnapshot) -> Result<FaceImageResult> {
        let body = ImagePayload {
            image: wire::encode_data_url(image),
        };
        let reply: ImageReply = self.post_json("api/blur-face", &body).await?;
        let face_count = reply.faces.unwrap_or(0);
        let snapshot = Self::image_from_reply(reply)?;
        Ok(FaceImageResult {
            snapshot,
            face_count,
        })
    }

    async fn emoji_faces(
        &self,
        image: &RasterSnapshot,
        emoji: EmojiKind,
    ) -> Result<FaceImageResult> {
        let body = EmojiRequest {
            image: wire::encode_data_url(image),
            emoji: emoji.as_str().to_string(),
        };
        let reply: ImageReply = self.post_json("api/emoji-face", &body).await?;
        let face_count = reply.faces.unwrap_or(0);
        let snapshot = Self::image_from_reply(reply)?;
        Ok(FaceImageResult {
            snapshot,
            face_count,
        })
    }

    async fn blur_background(&self, image: &RasterSnapshot) -> Result<RasterSnapshot> {
        let body = ImagePayload {
            image: wire::encode_data_url(image),
        };
        let reply: ImageReply = self.post_json("api/blur-background", &body).await?;
        Self::image_from_reply(reply)
    }

    async fn change_background(
        &self,
        image: &RasterSnapshot,
        bg_color: &str,
    ) -> Result<RasterSnapshot> {
        let body = RecolorRequest {
            image: wire::encode_data_url(image),
            bg_color: bg_color.to_string(),
        };
        let reply: ImageReply = self.post_json("api/change-background", &body).await?;
        Self::image_from_reply(reply)
    }

    async fn remove_background(&self, image: &RasterSnapshot) -> Result<RasterSnapshot> {
        let body = ImagePayload {
            image: wire::encode_data_url(image),
        };
        let reply: ImageReply = self.post_json("api/remove-background", &body).await?;
        Self::image_from_reply(reply)
    }

    async fn save_face_reference(&self, image: &RasterSnapshot) -> Result<EnrollOutcome> {
        let body = ImagePayload {
            image: wire::encode_data_url(image),
        };
        let reply: EnrollReply = self.post_json("api/save-face-reference", &body).await?;
        Ok(EnrollOutcome {
            success: reply.success,
            message: reply.message,
        })
    }

    async fn verify_face(&self, image: &RasterSnapshot) -> Result<VerifyOutcome> {
        let body = ImagePayload {
            image: wire::encode_data_url(image),
        };
        let reply: VerifyReply = self.post_json("api/verify-face", &body).await?;
        Ok(VerifyOutcome {
            success: reply.success,
            username: reply.username,
            message: reply.message,
        })
    }
}
