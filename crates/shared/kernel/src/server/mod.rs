//! Axum plumbing shared by every slice: application state, client metadata extraction
//! and the system routes.

mod client;
mod health;
mod router;
mod state;

pub use client::{ClientAddress, ClientMeta};
pub use health::HealthResponse;
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
