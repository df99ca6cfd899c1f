//! Telegram Bot API wire types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public Telegram Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Parse mode sent with every message.
pub const PARSE_MODE_HTML: &str = "HTML";

/// Telegram chat identifier.
///
/// Telegram accepts either a numeric chat id or a `@channelusername` string.
/// Anything else a caller sends is kept as raw JSON and relayed untouched;
/// Telegram decides whether it is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
    Raw(Value),
}

impl ChatId {
    /// Parse a configured chat id, preferring the numeric form.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map(ChatId::Id)
            .unwrap_or_else(|_| ChatId::Username(raw.to_string()))
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
            ChatId::Raw(value) => write!(f, "{}", value),
        }
    }
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    /// Omitted when neither the caller nor the config names a chat;
    /// Telegram then rejects the call itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<&'a ChatId>,
    pub text: &'a Value,
    pub parse_mode: &'static str,
    pub disable_web_page_preview: bool,
}

impl<'a> SendMessageRequest<'a> {
    pub fn html(chat_id: Option<&'a ChatId>, text: &'a Value) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: PARSE_MODE_HTML,
            disable_web_page_preview: true,
        }
    }
}
