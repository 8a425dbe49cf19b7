use super::attempt::{AttemptError, AttemptErrorExt};
use super::error::SubmitError;
use super::retry::{RetryEvent, RetryPolicy, retry_with_backoff};
use crate::domain::{ApiFailure, NewInquiry, SubmitReceipt};
use crate::error::ContactError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:10000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// What the backend reports about itself on `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Seconds since start.
    #[serde(default)]
    pub uptime: Option<u64>,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Talks to the contact API of a deployed backend.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct ContactClientBuilder {
    base_url: String,
    timeout: Duration,
    policy: RetryPolicy,
}

impl Default for ContactClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            policy: RetryPolicy::default(),
        }
    }
}

impl ContactClientBuilder {
    /// API root, e.g. `https://example.com/api`.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Deadline for each individual request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn build(self) -> Result<ContactClient, ContactError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("folio-contact/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ContactError::Http {
                source,
                context: Some("Building contact HTTP client".into()),
            })?;

        Ok(ContactClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            policy: self.policy,
        })
    }
}

impl ContactClient {
    #[must_use]
    pub fn builder() -> ContactClientBuilder {
        ContactClientBuilder::default()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Submits an inquiry, retrying transient failures.
    ///
    /// # Errors
    /// A classified [`SubmitError`] once the submission is rejected or retries run out.
    pub async fn submit(&self, inquiry: &NewInquiry) -> Result<SubmitReceipt, SubmitError> {
        self.submit_with_progress(inquiry, |_| {}).await
    }

    /// Like [`submit`](Self::submit), calling `on_retry` before each wait.
    ///
    /// # Errors
    /// A classified [`SubmitError`] once the submission is rejected or retries run out.
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    pub async fn submit_with_progress<C>(
        &self,
        inquiry: &NewInquiry,
        on_retry: C,
    ) -> Result<SubmitReceipt, SubmitError>
    where
        C: FnMut(RetryEvent<'_, AttemptError>),
    {
        let url = format!("{}/contact", self.base_url);
        let mut attempts = 0;

        let outcome = retry_with_backoff(
            &self.policy,
            || {
                attempts += 1;
                self.post_once(&url, inquiry)
            },
            on_retry,
        )
        .await;

        match outcome {
            Ok(receipt) => {
                info!(contact_id = %receipt.contact_id, attempts, "Inquiry delivered");
                Ok(receipt)
            },
            Err(last) => {
                let err = SubmitError::classify(last, attempts);
                warn!(attempts, error = %err, "Inquiry not delivered");
                Err(err)
            },
        }
    }

    /// Single health probe, no retries.
    ///
    /// # Errors
    /// [`AttemptError::Status`] for a non-success answer, [`AttemptError::Transport`] otherwise.
    pub async fn health(&self) -> Result<HealthReport, AttemptError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .context("Probing backend health")?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status { status: status.as_u16(), body: None });
        }

        response.json().await.context("Decoding health report")
    }

    async fn post_once(
        &self,
        url: &str,
        inquiry: &NewInquiry,
    ) -> Result<SubmitReceipt, AttemptError> {
        let response = self.http.post(url).json(inquiry).send().await?;

        let status = response.status();
        if status.is_success() {
            return response.json().await.context("Decoding submission receipt");
        }

        let body = response.json::<ApiFailure>().await.ok();
        Err(AttemptError::Status { status: status.as_u16(), body })
    }
}
