//! Relay endpoint handlers.
//!
//! The relay handler is strictly linear:
//! 1. Authenticate the internal caller
//! 2. Parse and validate the JSON body
//! 3. Forward the message to Telegram
//! 4. Map the outcome onto a status code

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::error::RelayError;
use crate::telegram::{ChatId, TelegramClient};
use crate::web::auth::authenticate;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telegram: TelegramClient,
}

impl AppState {
    pub fn new(config: Config, telegram: TelegramClient) -> Self {
        Self {
            config: Arc::new(config),
            telegram,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Relay
// =============================================================================

/// Inbound notification body.
#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
    #[serde(default, rename = "chatId")]
    pub chat_id: Option<ChatId>,
    /// Kept as raw JSON so falsy values can be told apart from absence.
    #[serde(default)]
    pub message: Option<Value>,
}

/// Largest inbound body read after authentication; anything bigger is a 500.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Relay response body, used for every outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn delivered(request_id: String, telegram_response: Value) -> Self {
        Self {
            success: true,
            request_id: Some(request_id),
            telegram_response: Some(telegram_response),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            request_id: None,
            telegram_response: None,
            error: Some(error),
        }
    }
}

/// Relay endpoint.
///
/// Mounted as the router fallback, so any method on any path other than
/// `/health` lands here. The body stays unread until the caller is
/// authenticated.
pub async fn relay_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request_id = match authenticate(&headers, state.config.internal_service_key.as_deref()) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match relay(&state, body).await {
        Ok(telegram_response) => {
            info!(request_id = %request_id, "telegram_relay_delivered");
            (
                StatusCode::OK,
                Json(RelayResponse::delivered(request_id, telegram_response)),
            )
                .into_response()
        }
        Err(RelayError::MissingMessage) => {
            info!(request_id = %request_id, "telegram_relay_missing_message");
            RelayError::MissingMessage.into_response()
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "telegram_relay_failed");
            e.into_response()
        }
    }
}

/// Parse, validate and forward an already authenticated request.
async fn relay(state: &AppState, body: Body) -> Result<Value, RelayError> {
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(RelayError::BodyRead)?;
    let request: NotificationRequest = serde_json::from_slice(&body)?;

    let text = truthy_message(request.message).ok_or(RelayError::MissingMessage)?;
    let chat_id = request
        .chat_id
        .as_ref()
        .or(state.config.default_chat_id.as_ref());

    let chat = chat_id.map(ToString::to_string).unwrap_or_default();
    info!(
        chat_id = %chat,
        used_default_chat = request.chat_id.is_none(),
        "telegram_relay_forwarding"
    );

    state.telegram.send_message(chat_id, &text).await
}

/// The message to relay, or `None` when it is absent or falsy
/// (`null`, `false`, `0`, `""`). Truthy values are relayed unchanged.
fn truthy_message(message: Option<Value>) -> Option<Value> {
    match message? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}
