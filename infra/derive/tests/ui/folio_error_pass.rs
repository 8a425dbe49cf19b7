use folio_derive::folio_error;
use std::borrow::Cow;

#[folio_error]
pub enum PassError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u16, PassError> {
    raw.parse::<u16>().context("Parsing port")
}

fn main() {
    let _ = parse("10000");
}
