//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at startup and shared read-only with
//! every request through `AppState`.

use std::env;
use tracing::warn;

use crate::telegram::{ChatId, DEFAULT_API_BASE};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret callers must present in `X-Internal-Key`
    pub internal_service_key: Option<String>,

    /// Chat used when a request does not name one
    pub default_chat_id: Option<ChatId>,

    /// Bot token embedded in the Telegram API path
    pub telegram_bot_token: String,

    /// Base URL of the Telegram Bot API
    pub telegram_api_base: String,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let internal_service_key = non_empty_var("INTERNAL_SERVICE_KEY");
        if internal_service_key.is_none() {
            warn!("internal_service_key_not_configured");
        }

        let telegram_bot_token = non_empty_var("TELEGRAM_BOT_TOKEN").unwrap_or_else(|| {
            warn!("telegram_bot_token_not_configured");
            String::new()
        });

        Config {
            internal_service_key,

            default_chat_id: non_empty_var("TELEGRAM_CHAT_ID").map(|v| ChatId::parse(&v)),

            telegram_bot_token,

            telegram_api_base: non_empty_var("TELEGRAM_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
