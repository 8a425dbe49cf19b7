use super::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use chrono::{DateTime, Utc};
use folio_derive::{api_handler, api_model};
use folio_domain::constants::SYSTEM_TAG;

#[api_model]
/// Health check response
pub struct HealthResponse {
    /// Always `up` while the process serves requests
    pub status: String,
    pub message: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
    pub timestamp: DateTime<Utc>,
    /// Deployment label from `server.environment`
    pub environment: String,
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Healthcheck endpoint", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up".to_owned(),
        message: "Server is running!".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
        environment: state.config.server.environment.clone(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
