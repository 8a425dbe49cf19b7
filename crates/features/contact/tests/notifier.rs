use chrono::Utc;
use folio_contact::server::{Delivery, Notifier, WhatsAppNotifier};
use folio_contact::{ContactError, Inquiry, InquiryStatus};
use folio_domain::config::NotifierConfig;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(api_base: String) -> NotifierConfig {
    NotifierConfig {
        account_sid: "AC123".to_owned(),
        auth_token: "secret".to_owned(),
        from_number: "14155238886".to_owned(),
        to_number: "98765 43210".to_owned(),
        api_base,
        timezone: chrono_tz::Asia::Kolkata,
    }
}

fn inquiry() -> Inquiry {
    let now = Utc::now();
    Inquiry {
        id: "Xk3p9QbTz2Am".to_owned(),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: None,
        subject: "Hello".to_owned(),
        message: "Let's talk".to_owned(),
        status: InquiryStatus::New,
        submitted_at: now,
        updated_at: now,
        source_ip: None,
        source_agent: None,
    }
}

#[tokio::test]
async fn sends_whatsapp_message_with_normalised_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
        .and(basic_auth("AC123", "secret"))
        .and(body_string_contains("From=whatsapp%3A%2B14155238886"))
        .and(body_string_contains("To=whatsapp%3A%2B919876543210"))
        .and(body_string_contains("ada%40example.com"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sid": "SM42", "status": "queued" })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = WhatsAppNotifier::new(&config(server.uri())).unwrap();
    let delivery = notifier.notify(&inquiry()).await.unwrap();

    assert_eq!(delivery, Delivery::Sent { id: "SM42".to_owned() });
}

#[tokio::test]
async fn provider_rejection_is_a_notification_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Authenticate"))
        .mount(&server)
        .await;

    let notifier = WhatsAppNotifier::new(&config(format!("{}/", server.uri()))).unwrap();
    let err = notifier.notify(&inquiry()).await.unwrap_err();

    assert!(matches!(err, ContactError::Notification { .. }), "{err}");
    assert!(err.to_string().contains("401"));
}
