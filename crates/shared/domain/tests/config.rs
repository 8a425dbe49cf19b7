use folio_domain::config::{
    ApiConfig, DatabaseConfig, NotifierConfig, RateLimitConfig, ServerConfig, StorageConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 10000);
    assert_eq!(server.environment, "development");
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "folio");
    assert_eq!(db.database, "portfolio");
    assert!(db.credentials.is_none());

    let limit = RateLimitConfig::default();
    assert_eq!(limit.max_requests, 5);
    assert_eq!(limit.window_secs, 900);

    let storage = StorageConfig::default();
    assert_eq!(storage.static_dir, std::path::PathBuf::from("frontend/dist"));
}

#[test]
fn optional_capabilities_are_absent_by_default() {
    let cfg = ApiConfig::default();
    assert!(cfg.database.is_none());
    assert!(cfg.notifier.is_none());
    assert!(cfg.cors.allowed_origins.is_empty());
    assert!(!cfg.contact.require_phone);
    assert!(!cfg.security.trust_proxy);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080, "environment": "production" },
        "database": { "url": "ws://db:8000", "credentials": { "username": "u", "password": "p" } },
        "notifier": {
            "account_sid": "AC123",
            "auth_token": "secret",
            "from_number": "+14155238886",
            "to_number": "9876543210",
            "timezone": "Europe/Berlin"
        },
        "cors": { "allowed_origins": ["https://example.dev"] },
        "contact": { "require_phone": true, "rate_limit": { "max_requests": 2 } }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.environment, "production");

    let db = cfg.database.as_ref().expect("database section");
    assert_eq!(db.url, "ws://db:8000");
    assert_eq!(db.namespace, "folio");
    assert_eq!(db.credentials.as_ref().map(|c| c.username.as_str()), Some("u"));

    let notifier = cfg.notifier.as_ref().expect("notifier section");
    assert_eq!(notifier.api_base, "https://api.twilio.com");
    assert_eq!(notifier.timezone, chrono_tz::Europe::Berlin);
    assert!(notifier.missing_fields().is_empty());

    assert_eq!(cfg.cors.allowed_origins, vec!["https://example.dev".to_owned()]);
    assert!(cfg.contact.require_phone);
    assert_eq!(cfg.contact.rate_limit.max_requests, 2);
    assert_eq!(cfg.contact.rate_limit.window_secs, 900);
}

#[test]
fn incomplete_notifier_reports_missing_fields() {
    let notifier = NotifierConfig { account_sid: "AC1".to_owned(), ..NotifierConfig::default() };
    assert_eq!(notifier.missing_fields(), vec!["auth_token", "from_number", "to_number"]);
}

#[test]
fn deref_mut_copies_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 4000;

    assert_eq!(original.server.port, 10000);
    assert_eq!(changed.server.port, 4000);
}

#[test]
fn allowed_origins_accept_a_comma_separated_string() {
    let cfg: ApiConfig = serde_json::from_value(json!({
        "cors": { "allowed_origins": "https://a.dev, https://b.dev,," }
    }))
    .unwrap();

    assert_eq!(cfg.cors.allowed_origins, vec!["https://a.dev", "https://b.dev"]);
}
