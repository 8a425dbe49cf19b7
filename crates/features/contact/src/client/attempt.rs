use super::retry::Transient;
use crate::domain::ApiFailure;
use std::borrow::Cow;

/// Outcome of a single failed request.
#[folio_derive::folio_error]
pub enum AttemptError {
    /// The server answered with a non-success status.
    #[error("Server answered {status}")]
    Status { status: u16, body: Option<ApiFailure> },

    /// The request never produced a usable response.
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
}

impl AttemptError {
    /// `true` for a 4xx answer other than 408 and 429.
    #[must_use]
    pub const fn is_permanent_status(&self) -> bool {
        matches!(self, Self::Status { status, .. } if is_permanent(*status))
    }
}

pub(crate) const fn is_permanent(status: u16) -> bool {
    status >= 400 && status < 500 && status != 408 && status != 429
}

impl Transient for AttemptError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Status { .. } => !self.is_permanent_status(),
            Self::Transport { source, .. } => !(source.is_builder() || source.is_decode()),
        }
    }
}
