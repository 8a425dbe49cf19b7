use crate::domain::{ApiFailure, INVALID_STATUS_MESSAGE, NOT_FOUND_MESSAGE};
use crate::error::ContactError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// An error response: status code plus the `{success:false, message, errors?}` body.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    body: ApiFailure,
}

impl Failure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: ApiFailure::new(message) }
    }

    /// Maps a slice error to its response. Causes of server-side failures are logged and
    /// replaced by `internal_message`.
    pub fn from_error(err: ContactError, internal_message: &'static str) -> Self {
        match err {
            ContactError::Validation { message, errors, .. } => Self {
                status: StatusCode::BAD_REQUEST,
                body: ApiFailure::new(message).with_errors(errors),
            },
            ContactError::InvalidStatus { .. } => {
                Self::new(StatusCode::BAD_REQUEST, INVALID_STATUS_MESSAGE)
            },
            ContactError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            other => {
                error!(error = %other, "{internal_message}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
            },
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
