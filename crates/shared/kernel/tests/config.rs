use config::Map;
use folio_kernel::config::load_config_with;
use folio_kernel::domain::config::ApiConfig;
use std::io::Write;

fn vars(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
    Some(pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let cfg: ApiConfig = load_config_with(Some(dir.path().join("absent")), vars(&[])).unwrap();

    assert_eq!(cfg.server.port, 10000);
    assert!(cfg.database.is_none());
    assert!(cfg.notifier.is_none());
    assert_eq!(cfg.contact.rate_limit.max_requests, 5);
}

#[test]
fn file_values_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[server]
port = 8080
environment = "production"

[database]
url = "ws://db:8000"

[contact]
require_phone = true
"#
    )
    .unwrap();

    let cfg: ApiConfig = load_config_with(Some(&path), vars(&[])).unwrap();

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.environment, "production");
    let database = cfg.database.as_ref().unwrap();
    assert_eq!(database.url, "ws://db:8000");
    assert_eq!(database.namespace, "folio");
    assert!(cfg.contact.require_phone);
}

#[test]
fn environment_overrides_file_and_port_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(&path, "[server]\nport = 8080\n").unwrap();

    let cfg: ApiConfig = load_config_with(
        Some(&path),
        vars(&[
            ("FOLIO__SERVER__ENVIRONMENT", "staging"),
            ("FOLIO__CORS__ALLOWED_ORIGINS", "https://a.dev,https://b.dev"),
            ("FOLIO__NOTIFIER__TO_NUMBER", "9876543210"),
            ("PORT", "9123"),
        ]),
    )
    .unwrap();

    assert_eq!(cfg.server.port, 9123);
    assert_eq!(cfg.server.environment, "staging");
    assert_eq!(cfg.cors.allowed_origins, vec!["https://a.dev", "https://b.dev"]);
    let notifier = cfg.notifier.as_ref().unwrap();
    assert_eq!(notifier.to_number, "9876543210");
    assert_eq!(notifier.missing_fields(), vec!["account_sid", "auth_token", "from_number"]);
}

#[test]
fn numeric_looking_environment_values_keep_their_text() {
    let dir = tempfile::tempdir().unwrap();

    let cfg: ApiConfig = load_config_with(
        Some(dir.path().join("absent")),
        vars(&[
            ("FOLIO__NOTIFIER__TO_NUMBER", "0987654321"),
            ("FOLIO__NOTIFIER__ACCOUNT_SID", "0012"),
            ("FOLIO__CONTACT__REQUIRE_PHONE", "true"),
            ("FOLIO__CONTACT__RATE_LIMIT__MAX_REQUESTS", "3"),
            ("FOLIO__CORS__ALLOWED_ORIGINS", "https://solo.dev"),
        ]),
    )
    .unwrap();

    let notifier = cfg.notifier.as_ref().unwrap();
    assert_eq!(notifier.to_number, "0987654321");
    assert_eq!(notifier.account_sid, "0012");
    assert!(cfg.contact.require_phone);
    assert_eq!(cfg.contact.rate_limit.max_requests, 3);
    assert_eq!(cfg.cors.allowed_origins, vec!["https://solo.dev"]);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    let err = load_config_with::<ApiConfig>(Some(&path), vars(&[])).unwrap_err();
    assert!(err.to_string().contains("Config error"));
}
