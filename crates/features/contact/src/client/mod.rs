//! Resilient submission client for the contact API.

pub mod attempt;
pub mod error;
mod http;
pub mod retry;

pub use attempt::AttemptError;
pub use error::SubmitError;
pub use http::{ContactClient, ContactClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HealthReport};
pub use retry::{RetryEvent, RetryPolicy, Transient, retry_with_backoff};
