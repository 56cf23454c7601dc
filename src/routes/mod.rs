//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - the worksheet lifecycle API under `/api/worksheets/...`
/// - the transactional email trigger under `/api/email/...`
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(http::http_health))
        // Worksheet lifecycle
        .route("/api/worksheets/generate", post(http::http_generate_worksheet))
        .route("/api/worksheets", get(http::http_list_worksheets))
        .route("/api/worksheets/options", get(http::http_get_options))
        .route(
            "/api/worksheets/:id",
            get(http::http_get_worksheet)
                .put(http::http_update_worksheet)
                .delete(http::http_delete_worksheet),
        )
        .route("/api/worksheets/:id/export/pdf", get(http::http_export_worksheet))
        // Email
        .route("/api/email/welcome", post(http::http_send_welcome))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
