//! Web server module for the internal relay endpoint.
//!
//! Any request other than `GET /health` is treated as a relay request:
//! authenticated, validated, forwarded to Telegram, and answered with
//! Telegram's result.

pub mod auth;
pub mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{health, relay_message, AppState, RelayResponse, MAX_BODY_BYTES};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(relay_message)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
