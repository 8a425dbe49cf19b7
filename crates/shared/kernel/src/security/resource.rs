use crate::SAFE_ALPHABET;
use std::borrow::Cow;

/// Longest identifier accepted from a caller.
const MAX_ID_LEN: usize = 64;

#[folio_derive::folio_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Utilities for safe resource handling and ID validation.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a caller-supplied record ID and returns its bare key.
    ///
    /// Accepts either the bare key (`"Xk3p9QbTz2Am"`) or a table-qualified form
    /// (`"inquiry:Xk3p9QbTz2Am"`). A qualified ID naming another table is rejected, which
    /// keeps a request from addressing records outside the expected table.
    ///
    /// # Errors
    /// Returns an error if the table does not match, the key is empty or too long, or it
    /// contains characters outside [`SAFE_ALPHABET`].
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref();
        let table_ref = expected_table.as_ref();

        let key = match id_ref.split_once(':') {
            Some((table, key)) if table == table_ref => key,
            Some((table, _)) => {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            },
            None => id_ref,
        };

        if key.is_empty() || key.len() > MAX_ID_LEN {
            return Err(ResourceGuardError::Validation {
                message: format!("ID length must be 1..={MAX_ID_LEN}").into(),
                context: Some(table_ref.to_owned().into()),
            });
        }

        if let Some(bad) = key.chars().find(|ch| !SAFE_ALPHABET.contains(ch)) {
            return Err(ResourceGuardError::Validation {
                message: format!("Unexpected character '{bad}'").into(),
                context: Some(table_ref.to_owned().into()),
            });
        }

        Ok(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_verification() {
        assert_eq!(ResourceGuard::verify("inquiry:Xk3p9QbTz2Am", "inquiry").unwrap(), "Xk3p9QbTz2Am");
        assert_eq!(ResourceGuard::verify("Xk3p9QbTz2Am", "inquiry").unwrap(), "Xk3p9QbTz2Am");

        // Foreign table
        assert!(ResourceGuard::verify("user:Xk3p9QbTz2Am", "inquiry").is_err());
    }
}
