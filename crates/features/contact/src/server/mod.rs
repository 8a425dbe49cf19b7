//! HTTP surface and storage of the contact slice.

mod handlers;
pub mod limiter;
pub mod notifier;
pub mod repository;
pub mod response;
mod router;
pub mod service;

pub use limiter::SubmissionGate;
pub use notifier::{Delivery, DisabledNotifier, Notifier, WhatsAppNotifier};
pub use repository::{InquiryRepository, Origin, SCHEMA};
pub use router::contact_router;
pub use service::ContactService;
