//! Outbound side of the relay: the Telegram Bot API.

pub mod client;
pub mod types;

pub use client::TelegramClient;
pub use types::{ChatId, DEFAULT_API_BASE};
