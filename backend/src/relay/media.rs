//! Media host client
//!
//! Uploads image bytes to the external media host and exposes a best-effort
//! destroy used to clean up orphans when a later pipeline stage fails.

use crate::config::MediaConfig;
use crate::relay::RelayError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Successful upload response from the media host
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUpload {
    /// Public HTTPS URL of the stored object
    pub secure_url: String,
    /// Host-side identifier, needed to destroy the object
    pub public_id: String,
}

/// Client for the media-hosting upload API
#[derive(Clone)]
pub struct MediaClient {
    http: Client,
    upload_url: String,
    destroy_url: String,
    api_key: String,
    api_secret: String,
}

impl MediaClient {
    pub fn new(http: Client, config: &MediaConfig) -> Self {
        Self {
            http,
            upload_url: config.upload_url.clone(),
            destroy_url: config.destroy_url.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Upload one image, returning its hosted URL and identifier
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<MediaUpload, RelayError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&self.upload_url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .multipart(form)
            .send()
            .await
            .map_err(|e| RelayError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::UploadFailed(format!(
                "media host returned {}: {}",
                status, body
            )));
        }

        response
            .json::<MediaUpload>()
            .await
            .map_err(|e| RelayError::MalformedUpstreamResponse(format!("media upload: {}", e)))
    }

    /// Best-effort delete of an uploaded object
    ///
    /// Failures are logged and swallowed; cleanup must never mask the
    /// pipeline error that triggered it.
    pub async fn destroy(&self, public_id: &str) {
        let result = self
            .http
            .post(&self.destroy_url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&json!({ "public_id": public_id }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!(public_id, status = %response.status(), "Orphan cleanup failed");
            }
            Err(e) => {
                warn!(public_id, error = %e, "Orphan cleanup failed");
            }
        }
    }
}
