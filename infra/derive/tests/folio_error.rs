use folio_derive::folio_error;
use std::borrow::Cow;

#[folio_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, DemoError> {
    Ok(std::fs::read_to_string("/definitely/not/here/folio.toml")?)
}

#[test]
fn source_errors_convert_with_question_mark() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
    assert!(err.to_string().starts_with("IO error: "));
}

#[test]
fn context_is_attached_to_source_results() {
    let res: Result<(), std::io::Error> = Err(std::io::Error::other("disk gone"));
    let err = res.context("Reading settings").unwrap_err();

    assert_eq!(err.to_string(), "IO error (Reading settings): disk gone");
}

#[test]
fn context_overrides_on_own_results() {
    let res: Result<(), DemoError> =
        Err(DemoError::Rejected { message: "bad input".into(), context: None });
    let err = res.context("Validating form").unwrap_err();

    assert_eq!(err.to_string(), "Rejected (Validating form): bad input");
}

#[test]
fn strings_become_internal_errors() {
    let borrowed = DemoError::from("static failure");
    let owned = DemoError::from(format!("failure #{}", 2));

    assert!(matches!(borrowed, DemoError::Internal { .. }));
    assert_eq!(owned.to_string(), "Internal error: failure #2");
}

#[test]
fn folio_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/folio_error_pass.rs");
    t.pass("tests/ui/api_model_pass.rs");
}
