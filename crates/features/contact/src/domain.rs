//! Inquiry model and the wire types shared by the intake endpoints and the submission client.

use crate::error::ContactError;
use chrono::{DateTime, Utc};
use folio_derive::api_model;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const INVALID_STATUS_MESSAGE: &str = "Invalid status value";
pub const NOT_FOUND_MESSAGE: &str = "Contact not found";
pub const RECEIVED_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";
pub const RATE_LIMITED_MESSAGE: &str =
    "Too many contact form submissions. Please try again later.";

/// Handling state of an inquiry. Any state may follow any other.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Read,
    Replied,
}

/// A stored contact form submission.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Inquiry {
    /// 12-character record key
    pub id: String,
    pub name: String,
    /// Trimmed and lower-cased
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: InquiryStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source_ip: Option<String>,
    pub source_agent: Option<String>,
}

/// Contact form payload as it arrives on the wire; every field is optional here.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NewInquiry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A submission that passed validation, with every field normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl NewInquiry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: None,
            subject: Some(subject.into()),
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Checks required fields, then normalises the payload.
    ///
    /// Every missing field is reported at once.
    ///
    /// # Errors
    /// [`ContactError::Validation`] with one entry per missing field.
    pub fn validate(self, require_phone: bool) -> Result<ValidInquiry, ContactError> {
        let name = trimmed(self.name);
        let email = trimmed(self.email).map(|email| email.to_lowercase());
        let phone = trimmed(self.phone);
        let subject = trimmed(self.subject);
        let message = trimmed(self.message);

        let missing: Vec<String> = [
            ("name", name.is_some()),
            ("email", email.is_some()),
            ("phone", !require_phone || phone.is_some()),
            ("subject", subject.is_some()),
            ("message", message.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| format!("{field} is required"))
        .collect();

        match (missing.is_empty(), name, email, subject, message) {
            (true, Some(name), Some(email), Some(subject), Some(message)) => {
                Ok(ValidInquiry { name, email, phone, subject, message })
            },
            _ => Err(ContactError::Validation {
                message: REQUIRED_FIELDS_MESSAGE.into(),
                errors: missing,
                context: None,
            }),
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Body of every unsuccessful response.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// Always `false`
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), errors: None }
    }

    /// Attaches per-field messages; an empty list leaves the field out.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = (!errors.is_empty()).then_some(errors);
        self
    }
}

/// Acknowledgement of a stored submission.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub success: bool,
    pub message: String,
    /// Key of the stored inquiry
    pub contact_id: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct InquiryEnvelope {
    pub success: bool,
    pub data: Inquiry,
}

/// One page of inquiries, newest first.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct InquiryPage {
    pub contacts: Vec<Inquiry>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_contacts: u64,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct InquiryPageEnvelope {
    pub success: bool,
    pub data: InquiryPage,
}

/// Body of a status change request.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusUpdate {
    /// # Errors
    /// [`ContactError::InvalidStatus`] for a missing value or one outside `new|read|replied`.
    pub fn parse(&self) -> Result<InquiryStatus, ContactError> {
        parse_status(self.status.as_deref())
    }
}

/// # Errors
/// [`ContactError::InvalidStatus`] for a missing value or one outside `new|read|replied`.
pub fn parse_status(value: Option<&str>) -> Result<InquiryStatus, ContactError> {
    value.and_then(|v| v.parse().ok()).ok_or_else(|| ContactError::InvalidStatus {
        message: value.unwrap_or_default().to_owned().into(),
        context: None,
    })
}

/// Query string of the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListParams {
    /// 1-based page number, defaults to 1
    pub page: Option<u32>,
    /// Page size, defaults to 20, capped at 100
    pub limit: Option<u32>,
    /// Only inquiries with this status
    pub status: Option<String>,
}

/// Normalised paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    #[must_use]
    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}
