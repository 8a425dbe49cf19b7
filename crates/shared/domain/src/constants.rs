//! Shared names used for tables, `OpenAPI` tags and configuration.

/// Environment variable prefix for configuration overrides (`FOLIO__SERVER__PORT`).
pub const ENV_PREFIX: &str = "FOLIO";
/// Conventional port variable set by hosting platforms.
pub const HOSTING_PORT_VAR: &str = "PORT";

/// Table holding contact form submissions.
pub const INQUIRY: &str = "inquiry";

/// `OpenAPI` tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for contact endpoints.
pub const CONTACT_TAG: &str = "Contact";
