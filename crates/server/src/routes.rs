pub mod records;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use configs::FrontendConfig;
use service::RecordService;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub records: RecordService,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: record API, health, and the static
/// frontend with index fallback for client-side routes.
pub fn build_router(state: AppState, frontend: &FrontendConfig, max_body_bytes: usize, cors: CorsLayer) -> Router {
    let static_dir = ServeDir::new(&frontend.static_dir).fallback(ServeFile::new(frontend.index_path()));

    Router::new()
        .route("/health", get(health))
        .route("/get-users", get(records::list_records))
        .route("/add-user", post(records::add_record))
        .route("/update-user", post(records::update_record))
        .route("/delete-user", post(records::delete_record))
        .fallback_service(static_dir)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
