use folio_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
    assert!(db.is_ephemeral());
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn schema_scripts_are_applied_and_idempotent() {
    const SCHEMA: &str = "DEFINE TABLE IF NOT EXISTS note SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS note_key ON note FIELDS key UNIQUE;";

    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .schema(SCHEMA)
        .schema(SCHEMA)
        .init()
        .await
        .expect("schema applied twice");

    db.query("CREATE note SET key = 'a'").await.expect("first insert").check().expect("ok");
    let duplicate = db.query("CREATE note SET key = 'a'").await.expect("query sent").check();
    assert!(duplicate.is_err(), "unique index should reject a duplicate key");
}

#[tokio::test]
async fn invalid_schema_is_reported() {
    let err = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .schema("DEFINE NONSENSE;")
        .init()
        .await
        .unwrap_err();

    assert!(matches!(err, DatabaseError::Schema { .. }));
}
