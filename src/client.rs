//! HTTP client for the remote nutrition-estimation service.

use crate::analysis::{AnalysisError, AnalysisResult};
use crate::config::Config;
use crate::http::shared_client;
use anyhow::anyhow;
use log::debug;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Field name the service expects the photo under.
const PHOTO_FIELD: &str = "photo";

/// Uploads captured photos and turns the service's answer into a validated
/// [`AnalysisResult`].
pub struct AnalysisClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl AnalysisClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: shared_client().clone(),
            url: config.analysis_url.clone(),
            timeout: config.upload_timeout,
        }
    }

    /// Sends `photo` (JPEG bytes) as a single multipart form field and
    /// validates the response.
    ///
    /// Transport problems (unreachable service, timeout, non-2xx status)
    /// come back as [`AnalysisError::Transport`]; a reachable service with
    /// an unusable payload is [`AnalysisError::Malformed`]. Neither case
    /// produces a journal entry.
    pub async fn analyze(&self, photo: Vec<u8>) -> Result<AnalysisResult, AnalysisError> {
        let part = Part::bytes(photo)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .expect("valid mime type");
        let form = Form::new().part(PHOTO_FIELD, part);

        debug!("uploading photo to {}", self.url);
        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport { error: e.into() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Transport {
                error: anyhow!("analysis service returned {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport { error: e.into() })?;
        AnalysisResult::parse_body(&body)
    }
}
