//! Upload relay: the three-stage external-call pipeline
//!
//! Stage 1 uploads both images to the media host; stage 2 calls
//! `process_urls` with the hosted pair; stage 3 calls `analyze` with the
//! URLs *from the stage-2 response* and returns its JSON body verbatim.
//! Stages are strictly sequential, there are no retries, and the first
//! failure aborts the pipeline. Already-uploaded objects are destroyed
//! best-effort when a later stage fails.

mod analysis;
mod media;

pub use analysis::{AnalysisClient, ProcessedUrls};
pub use media::{MediaClient, MediaUpload};

use crate::config::AppConfig;
use reqwest::Client;
use thiserror::Error;

/// Relay pipeline failure
///
/// Each variant carries the upstream detail for logging; clients only ever
/// see the fixed message from `client_message`.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("process_urls failed: {0}")]
    ProcessingFailed(String),

    #[error("analyze failed: {0}")]
    AnalysisFailed(String),

    #[error("malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),
}

impl RelayError {
    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::UploadFailed(_) => "UPLOAD_FAILED",
            RelayError::ProcessingFailed(_) => "PROCESSING_FAILED",
            RelayError::AnalysisFailed(_) => "ANALYSIS_FAILED",
            RelayError::MalformedUpstreamResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
        }
    }

    /// Fixed client-facing message; never includes upstream text
    pub fn client_message(&self) -> &'static str {
        match self {
            RelayError::UploadFailed(_) => "Image upload failed",
            RelayError::ProcessingFailed(_) => "Image processing failed",
            RelayError::AnalysisFailed(_) => "Image analysis failed",
            RelayError::MalformedUpstreamResponse(_) => {
                "Upstream service returned an unexpected response"
            }
        }
    }
}

/// Relay service owning the two upstream clients
#[derive(Clone)]
pub struct RelayService {
    media: MediaClient,
    analysis: AnalysisClient,
}

impl RelayService {
    /// Build from a shared HTTP client (constructed once, with a timeout)
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            media: MediaClient::new(http.clone(), &config.media),
            analysis: AnalysisClient::new(http, &config.analysis.base_url),
        }
    }

    /// Run the full pipeline over one image pair
    ///
    /// The caller must already be authenticated; this service trusts it.
    pub async fn relay(
        &self,
        image_a: Vec<u8>,
        image_b: Vec<u8>,
    ) -> Result<serde_json::Value, RelayError> {
        let upload_a = self.media.upload("image_a", image_a).await?;

        let upload_b = match self.media.upload("image_b", image_b).await {
            Ok(upload) => upload,
            Err(e) => {
                self.cleanup(&[&upload_a]).await;
                return Err(e);
            }
        };

        let processed = match self
            .analysis
            .process_urls(&upload_a.secure_url, &upload_b.secure_url)
            .await
        {
            Ok(urls) => urls,
            Err(e) => {
                self.cleanup(&[&upload_a, &upload_b]).await;
                return Err(e);
            }
        };

        match self.analysis.analyze(&processed).await {
            Ok(body) => Ok(body),
            Err(e) => {
                self.cleanup(&[&upload_a, &upload_b]).await;
                Err(e)
            }
        }
    }

    /// Destroy uploads orphaned by a later-stage failure
    async fn cleanup(&self, uploads: &[&MediaUpload]) {
        for upload in uploads {
            self.media.destroy(&upload.public_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages_never_leak_detail() {
        let detail = "upstream stack trace";
        for err in [
            RelayError::UploadFailed(detail.into()),
            RelayError::ProcessingFailed(detail.into()),
            RelayError::AnalysisFailed(detail.into()),
            RelayError::MalformedUpstreamResponse(detail.into()),
        ] {
            assert!(!err.client_message().contains(detail));
            assert!(!err.code().is_empty());
        }
    }
}
