//! Outbound notification of new inquiries.

use crate::domain::Inquiry;
use crate::error::{ContactError, ContactErrorExt};
use async_trait::async_trait;
use chrono_tz::Tz;
use folio_domain::config::NotifierConfig;
use serde::Deserialize;
use std::fmt::{Debug, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a notification attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the provider under this message id.
    Sent { id: String },
    /// No channel is configured; nothing was sent.
    Skipped,
}

/// Relays a summary of a new inquiry to the site owner.
#[async_trait]
pub trait Notifier: Debug + Send + Sync {
    async fn notify(&self, inquiry: &Inquiry) -> Result<Delivery, ContactError>;
}

/// Picks the notifier for a deployment: WhatsApp when fully configured, otherwise disabled.
#[must_use]
pub fn from_config(config: Option<&NotifierConfig>) -> Arc<dyn Notifier> {
    let Some(config) = config else {
        warn!("Notifier not configured; inquiry notifications are disabled");
        return Arc::new(DisabledNotifier);
    };

    let missing = config.missing_fields();
    if !missing.is_empty() {
        warn!(?missing, "Notifier configuration incomplete; inquiry notifications are disabled");
        return Arc::new(DisabledNotifier);
    }

    match WhatsAppNotifier::new(config) {
        Ok(notifier) => {
            info!(to = %notifier.to, "WhatsApp notifications enabled");
            Arc::new(notifier)
        },
        Err(e) => {
            warn!(error = %e, "WhatsApp client could not be built; inquiry notifications are disabled");
            Arc::new(DisabledNotifier)
        },
    }
}

/// Notifier used when no messaging channel is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, inquiry: &Inquiry) -> Result<Delivery, ContactError> {
        warn!(inquiry = %inquiry.id, "Notifier disabled; notification not delivered");
        Ok(Delivery::Skipped)
    }
}

/// Sends summaries through the Twilio WhatsApp Messages API.
#[derive(Debug, Clone)]
pub struct WhatsAppNotifier {
    http: reqwest::Client,
    endpoint: String,
    account_sid: String,
    auth_token: String,
    from: String,
    to: String,
    timezone: Tz,
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

impl WhatsAppNotifier {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &NotifierConfig) -> Result<Self, ContactError> {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .context("Building WhatsApp HTTP client")?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.api_base.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from: format_whatsapp_number(&config.from_number),
            to: format_whatsapp_number(&config.to_number),
            timezone: config.timezone,
        })
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    #[instrument(skip_all, fields(inquiry = %inquiry.id))]
    async fn notify(&self, inquiry: &Inquiry) -> Result<Delivery, ContactError> {
        let body = compose_summary(inquiry, self.timezone);
        let from = format!("whatsapp:{}", self.from);
        let to = format!("whatsapp:{}", self.to);

        let response = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", from.as_str()), ("To", to.as_str()), ("Body", body.as_str())])
            .send()
            .await
            .context("Sending WhatsApp message")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ContactError::Notification {
                message: format!("provider answered {status}: {detail}").into(),
                context: Some("Sending WhatsApp message".into()),
            });
        }

        let created: MessageCreated =
            response.json().await.context("Decoding WhatsApp response")?;
        info!(sid = %created.sid, "WhatsApp notification sent");

        Ok(Delivery::Sent { id: created.sid })
    }
}

/// Normalises a phone number for WhatsApp: digits only, `91` before bare 10-digit
/// numbers, and a leading `+`.
#[must_use]
pub fn format_whatsapp_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 && !digits.starts_with("91") {
        format!("+91{digits}")
    } else {
        format!("+{digits}")
    }
}

/// Message body announcing a new inquiry, with the submission time rendered in `timezone`.
#[must_use]
pub fn compose_summary(inquiry: &Inquiry, timezone: Tz) -> String {
    let submitted = inquiry.submitted_at.with_timezone(&timezone).format("%-d/%-m/%Y, %-I:%M:%S %P");
    let phone = inquiry.phone.as_deref().unwrap_or("Not provided");

    let mut summary = String::from("🔔 New Contact Form Submission\n\n");
    let _ = write!(
        summary,
        "👤 Name: {}\n📧 Email: {}\n📱 Phone: {phone}\n📋 Subject: {}\n\n💬 Message:\n{}\n\n\
         🕐 Submitted: {submitted} ({timezone})\n\n---\nReply directly to: {}",
        inquiry.name, inquiry.email, inquiry.subject, inquiry.message, inquiry.email,
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InquiryStatus;
    use chrono::{TimeZone, Utc};

    fn inquiry(phone: Option<&str>) -> Inquiry {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        Inquiry {
            id: "Xk3p9QbTz2Am".to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: phone.map(str::to_owned),
            subject: "Hello".to_owned(),
            message: "Let's talk".to_owned(),
            status: InquiryStatus::New,
            submitted_at: at,
            updated_at: at,
            source_ip: None,
            source_agent: None,
        }
    }

    #[test]
    fn phone_numbers_are_normalised() {
        assert_eq!(format_whatsapp_number("98765 43210"), "+919876543210");
        assert_eq!(format_whatsapp_number("+91 98765-43210"), "+919876543210");
        assert_eq!(format_whatsapp_number("14155238886"), "+14155238886");
        // 10 digits already starting with 91 are left alone.
        assert_eq!(format_whatsapp_number("9123456789"), "+9123456789");
    }

    #[test]
    fn summary_renders_local_time_and_reply_line() {
        let summary = compose_summary(&inquiry(None), chrono_tz::Asia::Kolkata);

        assert!(summary.starts_with("🔔 New Contact Form Submission"));
        assert!(summary.contains("👤 Name: Ada"));
        assert!(summary.contains("📱 Phone: Not provided"));
        assert!(summary.contains("🕐 Submitted: 18/10/2026, 3:00:00 pm (Asia/Kolkata)"));
        assert!(summary.ends_with("Reply directly to: ada@example.com"));
    }

    #[test]
    fn summary_includes_phone_when_present() {
        let summary = compose_summary(&inquiry(Some("+14155550100")), chrono_tz::UTC);
        assert!(summary.contains("📱 Phone: +14155550100"));
        assert!(summary.contains("18/10/2026, 9:30:00 am (UTC)"));
    }

    #[test]
    fn missing_or_incomplete_config_selects_disabled_notifier() {
        let disabled = format!("{:?}", from_config(None));
        assert!(disabled.contains("DisabledNotifier"));

        let partial = NotifierConfig { account_sid: "AC1".to_owned(), ..NotifierConfig::default() };
        assert!(format!("{:?}", from_config(Some(&partial))).contains("DisabledNotifier"));
    }

    #[tokio::test]
    async fn disabled_notifier_skips() {
        let delivery = DisabledNotifier.notify(&inquiry(None)).await.unwrap();
        assert_eq!(delivery, Delivery::Skipped);
    }
}
