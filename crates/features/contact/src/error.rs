use std::borrow::Cow;

/// Failures of the contact slice.
#[folio_derive::folio_error]
pub enum ContactError {
    /// The submission is incomplete or breaks a field rule.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation {
        message: Cow<'static, str>,
        /// One message per offending field.
        errors: Vec<String>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Inquiry not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A status outside `new|read|replied`.
    #[error("Invalid status{}: '{message}'", format_context(.context))]
    InvalidStatus { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Storage error{}: {source}", format_context(.context))]
    Storage { source: folio_database::DatabaseError, context: Option<Cow<'static, str>> },

    /// The messaging provider refused or failed to deliver a notification.
    #[cfg(feature = "server")]
    #[error("Notification error{}: {message}", format_context(.context))]
    Notification { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(any(feature = "server", feature = "client"))]
    #[error("HTTP error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Internal contact error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
