//! Telegram relay - authenticated internal notification forwarding.
//!
//! Internal services POST a message to this worker with a shared key; the
//! worker forwards it to the Telegram Bot API and returns Telegram's result.
//!
//! ## Flow
//!
//! ```text
//! Internal service → relay_message → authenticate → parse → TelegramClient → response
//! ```

pub mod config;
pub mod error;
pub mod telegram;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::RelayError;
pub use telegram::{ChatId, TelegramClient};
pub use web::{router, AppState};
