use super::attempt::{AttemptError, is_permanent};

pub const TIMEOUT_MESSAGE: &str = "Server is taking too long to respond. Please try again later.";
pub const UNAVAILABLE_MESSAGE: &str =
    "Server is temporarily unavailable. Please try again in a few moments.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred. Please try again later.";
pub const OFFLINE_MESSAGE: &str =
    "No internet connection. Please check your network and try again.";
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

/// Submission failure as shown to the visitor. `Display` yields the user-facing message.
#[folio_derive::folio_error]
pub enum SubmitError {
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout { attempts: u32, last: AttemptError },

    /// 502 or 503 after all retries.
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable { attempts: u32, last: AttemptError },

    #[error("{}", SERVER_ERROR_MESSAGE)]
    Server { attempts: u32, last: AttemptError },

    /// No connection could be established.
    #[error("{}", OFFLINE_MESSAGE)]
    Offline { attempts: u32, last: AttemptError },

    #[error("{}", FAILED_MESSAGE)]
    Failed { attempts: u32, last: AttemptError },

    /// The server refused the submission; carries its message and field errors.
    #[error("{message}")]
    Rejected { status: u16, message: String, errors: Vec<String> },
}

impl SubmitError {
    /// Maps the last attempt's error onto the class shown to the visitor.
    #[must_use]
    pub fn classify(last: AttemptError, attempts: u32) -> Self {
        let (timed_out, unreachable) = match &last {
            AttemptError::Transport { source, .. } => (source.is_timeout(), source.is_connect()),
            AttemptError::Status { .. } => (false, false),
        };

        match last {
            AttemptError::Status { status, ref body } if is_permanent(status) => {
                let (message, errors) = body.clone().map_or_else(
                    || (FAILED_MESSAGE.to_owned(), Vec::new()),
                    |b| (b.message, b.errors.unwrap_or_default()),
                );
                Self::Rejected { status, message, errors }
            },
            AttemptError::Status { status: 502 | 503, .. } => Self::Unavailable { attempts, last },
            AttemptError::Status { status: 500..=599, .. } => Self::Server { attempts, last },
            AttemptError::Transport { .. } if timed_out => Self::Timeout { attempts, last },
            AttemptError::Transport { .. } if unreachable => Self::Offline { attempts, last },
            _ => Self::Failed { attempts, last },
        }
    }

    /// Requests made before giving up.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Timeout { attempts, .. }
            | Self::Unavailable { attempts, .. }
            | Self::Server { attempts, .. }
            | Self::Offline { attempts, .. }
            | Self::Failed { attempts, .. } => *attempts,
            Self::Rejected { .. } => 1,
        }
    }

    /// Per-field messages from a rejection; empty for every other class.
    #[must_use]
    pub fn field_errors(&self) -> &[String] {
        match self {
            Self::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }

    #[must_use]
    pub const fn last_error(&self) -> Option<&AttemptError> {
        match self {
            Self::Timeout { last, .. }
            | Self::Unavailable { last, .. }
            | Self::Server { last, .. }
            | Self::Offline { last, .. }
            | Self::Failed { last, .. } => Some(last),
            Self::Rejected { .. } => None,
        }
    }
}
