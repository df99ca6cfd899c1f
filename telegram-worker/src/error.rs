//! Relay error taxonomy and its mapping onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::web::RelayResponse;

/// Message used when a failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing message parameter")]
    MissingMessage,

    #[error("Telegram API error: {0}")]
    TelegramApi(String),

    #[error("Failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Never carries the request URL, which embeds the bot token.
    #[error("{0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Http(e.without_url())
    }
}

impl RelayError {
    /// Status code for this failure. Only the two pre-checks get their own
    /// codes; everything else is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Unauthorized => StatusCode::FORBIDDEN,
            RelayError::MissingMessage => StatusCode::BAD_REQUEST,
            RelayError::TelegramApi(_)
            | RelayError::BodyRead(_)
            | RelayError::InvalidBody(_)
            | RelayError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message reported to the caller. A Telegram rejection with an empty
    /// body has nothing to report, so it falls back to [`UNKNOWN_ERROR`].
    pub fn client_message(&self) -> String {
        match self {
            RelayError::TelegramApi(body) if body.trim().is_empty() => UNKNOWN_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(RelayResponse::failure(self.client_message())),
        )
            .into_response()
    }
}
