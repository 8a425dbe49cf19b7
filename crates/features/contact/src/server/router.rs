use super::handlers;
use super::limiter::{SubmissionGate, enforce};
use axum::middleware::from_fn_with_state;
use folio_domain::config::ApiConfig;
use folio_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Contact routes, relative to the API root.
///
/// Only the intake route sits behind the submission limiter.
pub fn contact_router(config: &ApiConfig) -> OpenApiRouter<ApiState> {
    let intake = OpenApiRouter::new()
        .routes(routes!(handlers::submit_handler))
        .layer(from_fn_with_state(SubmissionGate::from_config(config), enforce));

    OpenApiRouter::new()
        .merge(intake)
        .routes(routes!(handlers::list_handler))
        .routes(routes!(handlers::get_handler))
        .routes(routes!(handlers::update_status_handler))
}
