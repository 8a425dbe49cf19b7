use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, Uri, header};
use axum::response::Json;
use folio::domain::config::{CorsConfig, StorageConfig};
use folio::kernel::prelude::ApiState;
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(info(title = "Folio API", description = "Portfolio contact backend"))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let cors = cors_layer(&state.config.cors);
    let storage = state.config.storage.clone();

    // Separate the OpenAPI routes and the API documentation object
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", folio::server::router(&state.config))
        .with_state(state)
        .split_for_parts();

    let app = Router::new().merge(api_routes).merge(Scalar::with_url("/docs", api_doc));

    with_frontend(app, &storage)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serves the built front end for every unmatched path, falling back to `index.html`
/// so client-side routes resolve.
fn with_frontend(app: Router, storage: &StorageConfig) -> Router {
    let index = storage.static_dir.join("index.html");

    if index.is_file() {
        info!(dir = %storage.static_dir.display(), "Serving front end");
        app.fallback_service(ServeDir::new(&storage.static_dir).fallback(ServeFile::new(index)))
    } else {
        warn!(dir = %storage.static_dir.display(), "Front end build not found; serving API only");
        app.fallback(development_notice)
    }
}

async fn development_notice(uri: Uri) -> Json<Value> {
    Json(json!({
        "message": "API is running in development mode",
        "note": "Frontend build files not found",
        "path": uri.path(),
    }))
}

/// An empty origin list allows any origin without credentials.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .inspect_err(|_| warn!(%origin, "Ignoring malformed CORS origin"))
                .ok()
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
