//! HTTP client for the server's cache cleanup endpoint.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct CleanupResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub space_freed: Option<i64>,
    #[serde(default)]
    pub files_removed: Option<i64>,
}

impl CleanupResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct CleanupClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl CleanupClient {
    pub fn new(endpoint: Url) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Asks the server to clean every cache location. The body is decoded whatever the
    /// HTTP status, since failures come back as `{status: "error", message}` with a 500.
    pub async fn clean_cache(&self) -> Result<CleanupResponse, ApiError> {
        let body = self
            .http
            .post(self.endpoint.clone())
            .json(&serde_json::json!({}))
            .send()
            .await?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
