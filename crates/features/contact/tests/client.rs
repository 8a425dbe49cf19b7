use folio_contact::NewInquiry;
use folio_contact::client::error::{
    FAILED_MESSAGE, OFFLINE_MESSAGE, SERVER_ERROR_MESSAGE, TIMEOUT_MESSAGE, UNAVAILABLE_MESSAGE,
};
use folio_contact::client::{ContactClient, RetryPolicy, SubmitError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(10), 1.5, Duration::from_millis(40))
}

fn client(server: &MockServer, attempts: u32) -> ContactClient {
    ContactClient::builder()
        .base_url(format!("{}/api/", server.uri()))
        .policy(fast_policy(attempts))
        .build()
        .unwrap()
}

fn inquiry() -> NewInquiry {
    NewInquiry::new("Ada", "ada@example.com", "Hello", "Let's build something")
}

fn receipt() -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "success": true,
        "message": "Message received",
        "contactId": "Xk3p9QbTz2Am",
    }))
}

#[tokio::test]
async fn submits_on_first_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .and(body_partial_json(json!({ "name": "Ada", "email": "ada@example.com" })))
        .respond_with(receipt())
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client(&server, 6).submit(&inquiry()).await.unwrap();
    assert_eq!(receipt.contact_id, "Xk3p9QbTz2Am");
}

#[tokio::test]
async fn retries_unavailable_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST")).and(path("/api/contact")).respond_with(receipt()).mount(&server).await;

    let mut progress = Vec::new();
    let receipt = client(&server, 6)
        .submit_with_progress(&inquiry(), |event| progress.push((event.attempt, event.delay)))
        .await
        .unwrap();

    assert!(receipt.success);
    assert_eq!(
        progress,
        vec![(1, Duration::from_millis(10)), (2, Duration::from_millis(15))]
    );
}

#[tokio::test]
async fn validation_rejection_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Please fill in all required fields",
            "errors": ["phone is required"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 6).submit(&inquiry()).await.unwrap_err();

    assert!(matches!(err, SubmitError::Rejected { status: 400, .. }));
    assert_eq!(err.to_string(), "Please fill in all required fields");
    assert_eq!(err.field_errors(), ["phone is required".to_owned()]);
}

#[tokio::test]
async fn exhausted_server_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, 3).submit(&inquiry()).await.unwrap_err();

    assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);
    assert_eq!(err.attempts(), 3);
}

#[tokio::test]
async fn exhausted_unavailable_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server, 2).submit(&inquiry()).await.unwrap_err();
    assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn exhausted_rate_limit_reports_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "success": false,
            "message": "Too many contact form submissions, please try again later.",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server, 2).submit(&inquiry()).await.unwrap_err();
    assert_eq!(err.to_string(), FAILED_MESSAGE);
}

#[tokio::test]
async fn slow_server_is_reported_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(receipt().set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = ContactClient::builder()
        .base_url(format!("{}/api", server.uri()))
        .timeout(Duration::from_millis(50))
        .policy(fast_policy(2))
        .build()
        .unwrap();

    let err = client.submit(&inquiry()).await.unwrap_err();
    assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn unreachable_server_is_reported_as_offline() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = ContactClient::builder()
        .base_url(format!("http://127.0.0.1:{port}/api"))
        .policy(fast_policy(2))
        .build()
        .unwrap();

    let err = client.submit(&inquiry()).await.unwrap_err();
    assert_eq!(err.to_string(), OFFLINE_MESSAGE);
    assert_eq!(err.attempts(), 2);
}

#[tokio::test]
async fn health_probe_reads_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "up",
            "message": "Server is running!",
            "version": "0.1.0",
            "uptime": 42,
            "timestamp": "2026-10-18T09:30:00Z",
            "environment": "production",
        })))
        .mount(&server)
        .await;

    let report = client(&server, 1).health().await.unwrap();
    assert_eq!(report.status, "up");
    assert_eq!(report.uptime, Some(42));
    assert_eq!(report.environment.as_deref(), Some("production"));
}
