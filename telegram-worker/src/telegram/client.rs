//! Telegram Bot API client.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::types::{ChatId, SendMessageRequest};
use crate::error::RelayError;
use crate::Config;

/// Thin `sendMessage` client.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool, and the endpoint is resolved once at construction.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    send_message_url: Url,
}

impl TelegramClient {
    /// Build a client for the API base and bot token in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let send_message_url =
            send_message_url(&config.telegram_api_base, &config.telegram_bot_token)?;

        Ok(Self {
            http: Client::new(),
            send_message_url,
        })
    }

    /// Send `text` to `chat_id`, returning Telegram's JSON response verbatim.
    ///
    /// A non-success status is surfaced as [`RelayError::TelegramApi`]
    /// carrying the raw response body. `text` is relayed as given, so a
    /// non-string value reaches Telegram unchanged.
    pub async fn send_message(
        &self,
        chat_id: Option<&ChatId>,
        text: &Value,
    ) -> Result<Value, RelayError> {
        let chat = chat_id.map(ToString::to_string).unwrap_or_default();
        tracing::info!(
            chat_id = %chat,
            text_is_string = text.is_string(),
            "telegram_send_starting"
        );

        let response = self
            .http
            .post(self.send_message_url.clone())
            .json(&SendMessageRequest::html(chat_id, text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!(
                status_code = status.as_u16(),
                body_length = body.len(),
                "telegram_send_rejected"
            );
            return Err(RelayError::TelegramApi(body));
        }

        let body = response.json::<Value>().await?;

        tracing::info!(status_code = status.as_u16(), "telegram_send_complete");

        Ok(body)
    }
}

/// Resolve `{base}/bot{token}/sendMessage`.
fn send_message_url(base: &str, token: &str) -> Result<Url> {
    let mut url = Url::parse(base).context("Invalid Telegram API base URL")?;

    url.path_segments_mut()
        .map_err(|_| anyhow!("Telegram API base URL cannot carry a path: {}", base))?
        .pop_if_empty()
        .push(&format!("bot{}", token))
        .push("sendMessage");

    Ok(url)
}
