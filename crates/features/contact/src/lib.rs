//! Contact feature slice.
//!
//! Visitors submit inquiries through `POST /api/contact`; each one is validated,
//! normalised, stored and relayed to the site owner over WhatsApp. Administrators
//! page through inquiries and move them through `new → read → replied`.
//!
//! * `server` — storage, notifier, Axum handlers and the submission limiter.
//! * `client` — [`client::ContactClient`], which submits with exponential backoff and
//!   turns failures into messages a visitor can act on.
pub mod domain;
pub mod error;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod server;

pub use domain::{Inquiry, InquiryStatus, NewInquiry};
pub use error::{ContactError, ContactErrorExt};

#[cfg(feature = "server")]
use folio_database::Database;
#[cfg(feature = "server")]
use folio_kernel::domain::config::ApiConfig;
#[cfg(feature = "server")]
use folio_kernel::domain::registry::InitializedSlice;

#[cfg(feature = "server")]
#[folio_derive::folio_slice]
pub struct Contact {
    pub service: server::ContactService,
}

/// Wires the contact slice against a connected database.
///
/// # Errors
/// Currently infallible; kept fallible so slices share one init signature.
#[cfg(feature = "server")]
pub fn init(config: &ApiConfig, database: &Database) -> Result<InitializedSlice, ContactError> {
    let repository = server::InquiryRepository::new(database.clone());
    let notifier = server::notifier::from_config(config.notifier.as_ref());
    let service = server::ContactService::new(repository, notifier, config.contact.require_phone);

    tracing::debug!(require_phone = config.contact.require_phone, "Contact slice initialized");
    Ok(InitializedSlice::new(Contact::new(ContactInner { service })))
}
