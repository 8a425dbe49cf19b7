use folio_derive::api_model;

#[api_model(deny_unknown_fields = false)]
pub struct StatusUpdate {
    pub status: String,
    pub changed_by: Option<String>,
}

fn main() {
    let parsed: StatusUpdate =
        serde_json::from_str(r#"{"status":"read","changedBy":"admin","extra":1}"#).unwrap();
    assert_eq!(parsed.status, "read");
    assert_eq!(parsed.changed_by.as_deref(), Some("admin"));
}
