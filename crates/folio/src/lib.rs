//! Facade crate for the Folio backend and its clients.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `folio` with the desired feature flags (`server`/`client`).
//! - Call `folio::init` (server) to register feature slices and `folio::server::router`
//!   for the routes they expose.

pub use folio_domain as domain;
pub use folio_kernel as kernel;

#[cfg(feature = "server")]
use folio_database::Database;
#[cfg(feature = "server")]
use folio_domain::config::ApiConfig;

#[cfg(feature = "server")]
pub mod server {
    use folio_database::DatabaseBuilder;
    use folio_domain::config::{ApiConfig, DatabaseConfig};
    use folio_kernel::server::{ApiState, system_router};
    use utoipa_axum::router::OpenApiRouter;

    /// Every slice schema, applied in order when the database connects.
    pub const SCHEMAS: &[&str] = &[folio_contact::server::SCHEMA];

    /// All API routes, relative to the `/api` prefix.
    pub fn router(config: &ApiConfig) -> OpenApiRouter<ApiState> {
        OpenApiRouter::new()
            .merge(system_router())
            .merge(folio_contact::server::contact_router(config))
    }

    /// Database builder for `config`, carrying every slice schema. Without a section the
    /// in-memory engine is used.
    #[must_use]
    pub fn database(config: Option<&DatabaseConfig>) -> DatabaseBuilder {
        let defaults = DatabaseConfig::default();
        let config = config.unwrap_or(&defaults);

        let mut builder =
            DatabaseBuilder::new().url(&config.url).session(&config.namespace, &config.database);
        if let Some(credentials) = &config.credentials {
            builder = builder.auth(&credentials.username, &credentials.password);
        }

        SCHEMAS.iter().copied().fold(builder, DatabaseBuilder::schema)
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use folio_contact as contact;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
        "contact",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
    database: &Database,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![features::contact::init(config, database)?];

    tracing::info!(count = slices.len(), "Feature slices initialized");
    Ok(slices)
}
