use super::response::Failure;
use crate::domain::RATE_LIMITED_MESSAGE;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use folio_domain::config::ApiConfig;
use folio_kernel::security::rate_limit::{RateDecision, RateLimiter};
use folio_kernel::server::ClientAddress;
use std::time::Duration;
use tracing::warn;

/// Per-address submission budget guarding the intake route.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    limiter: RateLimiter,
    trust_proxy: bool,
}

impl SubmissionGate {
    #[must_use]
    pub fn new(limiter: RateLimiter, trust_proxy: bool) -> Self {
        Self { limiter, trust_proxy }
    }

    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let limit = config.contact.rate_limit;
        Self::new(
            RateLimiter::new(limit.max_requests, Duration::from_secs(limit.window_secs)),
            config.security.trust_proxy,
        )
    }
}

/// Counts the request against the caller's window before anything else runs.
///
/// Also stores the resolved [`ClientAddress`] so later extractors see the same address.
pub async fn enforce(State(gate): State<SubmissionGate>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let address = ClientAddress::resolve(&parts, gate.trust_proxy);
    parts.extensions.insert(address);

    match gate.limiter.check(address.0) {
        RateDecision::Allowed { .. } => next.run(Request::from_parts(parts, body)).await,
        RateDecision::Limited => {
            warn!(client = %address.0, "Contact submission rate limit exceeded");
            Failure::new(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE).into_response()
        },
    }
}
