use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{metrics, types::Health};
use service::items::{ItemRepository, ItemService};

use crate::openapi::ApiDoc;

pub mod items;

/// Shared handler state. The item service is built once at startup from an
/// explicitly chosen repository.
#[derive(Clone)]
pub struct ServerState {
    pub items: ItemService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { items: ItemService::new(repo) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics_handler() -> impl IntoResponse {
    metrics::encode_metrics()
}

/// Build the full application router.
///
/// | Method | Path             | Handler          |
/// |--------|------------------|------------------|
/// | POST   | /api/items       | `items::create`  |
/// | GET    | /api/items       | `items::list`    |
/// | GET    | /api/items/:id   | `items::get`     |
/// | PUT    | /api/items/:id   | `items::update`  |
/// | DELETE | /api/items/:id   | `items::delete`  |
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (health + metrics + docs)
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Item API routes
    let api = Router::new()
        .route("/api/items", get(items::list).post(items::create))
        .route(
            "/api/items/:id",
            get(items::get).put(items::update).delete(items::delete),
        );

    // Compose
    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // Status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
