use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

use crate::candidate::Candidate;

/// Hard ceiling on one publish attempt, connect time included.
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("publish timeout")]
    Timeout,

    #[error("api error {status}")]
    Http { status: StatusCode },

    #[error("unreadable response: {0}")]
    InvalidResponse(String),

    #[error("network error: {0}")]
    Network(String),
}

impl PublishError {
    fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// What the ingestion API said about a published candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishReceipt {
    pub id: Option<String>,
}

/// Sink that accepted candidates are handed to. `HttpPublisher` is the
/// real one; tests substitute mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateSink: Send + Sync {
    async fn publish(&self, candidate: &Candidate) -> Result<PublishReceipt, PublishError>;
}

/// Publishes candidates to the ingestion API over HTTP with bearer auth.
pub struct HttpPublisher {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpPublisher {
    pub fn new(base_url: &str, token: &str) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(PUBLISH_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl CandidateSink for HttpPublisher {
    #[instrument(skip_all, fields(candidate_key = %candidate.candidate_key))]
    async fn publish(&self, candidate: &Candidate) -> Result<PublishReceipt, PublishError> {
        let url = format!("{}/candidates", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(candidate)
            .send()
            .await
            .map_err(PublishError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Http { status });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| PublishError::InvalidResponse(err.to_string()))?;
        Ok(receipt_from_body(&body))
    }
}

/// The id may come back as a string or a number; keep it readable either
/// way, and treat an explicit null like a missing id.
fn receipt_from_body(body: &Value) -> PublishReceipt {
    let id = body.get("id").and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    });
    PublishReceipt { id }
}
