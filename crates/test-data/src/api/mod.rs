//! HTTP client for replaying telemetry against a running coach service.
//!
//! Snapshots are posted through the same `/feedback` endpoint the app uses.

use coach::models::TelemetrySnapshot;
use coach::types::FeedbackRequest;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Feedback request failed: {0}")]
    FeedbackFailed(String),
    #[error("Backend not reachable at {0}")]
    BackendNotReachable(String),
}

/// Response from the feedback endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CoachReply {
    pub success: bool,
    pub feedback: String,
    pub timestamp: String,
}

/// Client that posts snapshots to the coach service.
pub struct CoachClient {
    client: Client,
    base_url: String,
}

impl CoachClient {
    /// Creates a new client for the given backend URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Checks if the backend is reachable.
    pub async fn check_health(&self) -> Result<(), ApiError> {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(ApiError::BackendNotReachable(format!(
                "Health check returned status {}",
                resp.status()
            ))),
            Err(e) => Err(ApiError::BackendNotReachable(e.to_string())),
        }
    }

    /// Posts one snapshot and returns the coach's reply.
    pub async fn post_feedback(&self, snapshot: &TelemetrySnapshot) -> Result<CoachReply, ApiError> {
        let url = format!("{}/feedback", self.base_url);

        debug!(
            "Posting snapshot at {:.2} km, {}s",
            snapshot.distance_km, snapshot.duration_sec
        );

        let resp = self
            .client
            .post(&url)
            .json(&FeedbackRequest::from(snapshot))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::FeedbackFailed(format!("Status {status}: {body}")));
        }

        Ok(resp.json().await?)
    }
}
