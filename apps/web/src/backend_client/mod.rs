//! Backend client: the single point of entry for all calls to the CareerFlow
//! job service (resume ingestion, job suggestions, ATS scoring).
//!
//! The widget never touches `reqwest` directly; it talks to a `JobBackend`,
//! and tests swap the network for a recording fake.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{
    AtsScoreRequest, AtsScoreResult, JobSuggestion, ResumeHandle, SuggestJobsResponse,
    UploadResumeRequest, UploadResumeResponse,
};

const UPLOAD_ENDPOINT: &str = "/api/resume/upload";
const SUGGEST_ENDPOINT: &str = "/api/jobs/suggest";
const ATS_SCORE_ENDPOINT: &str = "/api/ats-score";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The request could not be sent or the response could not be received.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// The job service as seen by the demo widget.
///
/// Carried by each widget as `Arc<dyn JobBackend>`.
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn upload_resume(&self, content: &str) -> Result<ResumeHandle, BackendError>;

    async fn suggest_jobs(
        &self,
        resume_id: &ResumeHandle,
    ) -> Result<Vec<JobSuggestion>, BackendError>;

    async fn ats_score(
        &self,
        resume_id: &ResumeHandle,
        job_id: &str,
    ) -> Result<AtsScoreResult, BackendError>;
}

/// HTTP implementation of `JobBackend`.
/// Retries failed sends with exponential backoff: POSTs only when the
/// connection could not be established, the suggestion GET on any send error.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl BackendClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_settings(
            config.backend_url.clone(),
            config.backend_timeout,
            config.backend_max_retries,
            config.backend_retry_backoff,
        )
    }

    pub fn with_settings(
        base_url: String,
        timeout: Duration,
        max_retries: u32,
        retry_backoff: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            retry_backoff,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the request built by `build`, retrying only when sending fails.
    /// Non-success statuses and undecodable bodies are returned immediately.
    ///
    /// A non-idempotent request may already have reached the backend when it
    /// times out, so it is retried only on connect failures.
    async fn execute<T, F>(
        &self,
        endpoint: &str,
        idempotent: bool,
        build: F,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut attempt: u32 = 0;

        loop {
            match build(&self.client, url.as_str()).send().await {
                Ok(response) => return decode_response(endpoint, response).await,
                Err(e) if attempt < self.max_retries && (idempotent || e.is_connect()) => {
                    // Exponential backoff: base, 2×base, 4×base, ...
                    let delay = self.retry_backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        "Request to {} failed (attempt {}): {}; retrying after {}ms",
                        endpoint,
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(BackendError::Network(e.to_string())),
            }
        }
    }
}

async fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, BackendError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        warn!("Backend {} returned {}: {}", endpoint, status, message);
        return Err(BackendError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;

    debug!("Backend {} responded with {} bytes", endpoint, body.len());

    serde_json::from_str(&body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl JobBackend for BackendClient {
    async fn upload_resume(&self, content: &str) -> Result<ResumeHandle, BackendError> {
        let payload = UploadResumeRequest { content };
        let response: UploadResumeResponse = self
            .execute(UPLOAD_ENDPOINT, false, |client, url| client.post(url).json(&payload))
            .await?;
        Ok(response.resume_id)
    }

    async fn suggest_jobs(
        &self,
        resume_id: &ResumeHandle,
    ) -> Result<Vec<JobSuggestion>, BackendError> {
        let response: SuggestJobsResponse = self
            .execute(SUGGEST_ENDPOINT, true, |client, url| {
                client
                    .get(url)
                    .query(&[("resume_id", resume_id.as_str())])
            })
            .await?;
        Ok(response.jobs)
    }

    async fn ats_score(
        &self,
        resume_id: &ResumeHandle,
        job_id: &str,
    ) -> Result<AtsScoreResult, BackendError> {
        let payload = AtsScoreRequest { resume_id, job_id };
        self.execute(ATS_SCORE_ENDPOINT, false, |client, url| client.post(url).json(&payload))
            .await
    }
}
