//! Worksheet Generator Backend
//!
//! - Axum HTTP API: generate, list, fetch, update, delete and export
//!   worksheets against an in-memory store
//! - OpenAI-backed content generation (via environment variables)
//! - Resend transactional email for welcome notifications
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   OPENAI_API_KEY    : enables worksheet generation if present
//!   OPENAI_BASE_URL    : default "https://api.openai.com/v1"
//!   OPENAI_MODEL  : default "gpt-4o-mini"
//!   RESEND_API_KEY    : enables welcome emails if present
//!   RESEND_BASE_URL    : default "https://api.resend.com"
//!   RESEND_FROM_EMAIL  : sender identity, e.g. "Worksheets <hi@example.com>"
//!   WORKSHEET_CONFIG_PATH  : path to TOML config (prompts + email templates)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod options;
mod store;
mod state;
mod protocol;
mod logic;
mod openai;
mod email;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    // Build shared application state (worksheet store, collaborator clients, prompts).
    let state = Arc::new(AppState::new());

    // Build the HTTP router with routes, CORS and tracing layers.
    let app = build_router(state.clone());

    // Read port from env or default to 3000.
    let addr: SocketAddr = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

    let listener = TcpListener::bind(addr).await?;
    info!(target: "worksheet_backend", %addr, "HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
