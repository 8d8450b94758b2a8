//! Change-detection analysis API client
//!
//! Two JSON endpoints under one base URL: `process_urls` registers an image
//! pair and returns the (possibly re-hosted) pair plus a change-mask URL;
//! `analyze` consumes those three URLs. Responses are decoded into typed
//! schemas rather than trusted blindly.

use crate::relay::RelayError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Request body for `process_urls`
#[derive(Debug, Serialize)]
struct ProcessUrlsRequest<'a> {
    image_a_url: &'a str,
    image_b_url: &'a str,
}

/// Typed response of `process_urls`
///
/// The URLs returned here are authoritative for the rest of the pipeline;
/// the originally uploaded URLs are not used again. The service may re-host
/// or normalize the pair, and analysis depends on that form.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessedUrls {
    pub image_a_url: String,
    pub image_b_url: String,
    pub result_url: String,
}

/// Request body for `analyze`
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    image_a_url: &'a str,
    image_b_url: &'a str,
    change_mask_url: &'a str,
}

/// Client for the analysis endpoints
#[derive(Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Register an uploaded image pair for processing
    pub async fn process_urls(
        &self,
        image_a_url: &str,
        image_b_url: &str,
    ) -> Result<ProcessedUrls, RelayError> {
        let response = self
            .http
            .post(format!("{}/process_urls", self.base_url))
            .json(&ProcessUrlsRequest {
                image_a_url,
                image_b_url,
            })
            .send()
            .await
            .map_err(|e| RelayError::ProcessingFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::ProcessingFailed(format!(
                "process_urls returned {}: {}",
                status, body
            )));
        }

        response
            .json::<ProcessedUrls>()
            .await
            .map_err(|e| RelayError::MalformedUpstreamResponse(format!("process_urls: {}", e)))
    }

    /// Run analysis over the processed pair and its change mask
    ///
    /// The JSON body is returned verbatim to the caller.
    pub async fn analyze(&self, urls: &ProcessedUrls) -> Result<serde_json::Value, RelayError> {
        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .json(&AnalyzeRequest {
                image_a_url: &urls.image_a_url,
                image_b_url: &urls.image_b_url,
                change_mask_url: &urls.result_url,
            })
            .send()
            .await
            .map_err(|e| RelayError::AnalysisFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::AnalysisFailed(format!(
                "analyze returned {}: {}",
                status, body
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RelayError::MalformedUpstreamResponse(format!("analyze: {}", e)))
    }
}
