//! Channel Integrations
//!
//! The outbound surface the bot needs from a chat platform, and the Telegram
//! implementation of it.

pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

/// Outbound operations on a chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send a text reply into a chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Show the "typing" presence indicator in a chat.
    async fn send_typing(&self, chat_id: i64) -> Result<()>;

    /// Register `url` as the platform's push endpoint for this bot.
    async fn set_webhook(&self, url: &str) -> Result<()>;

    /// The platform's current webhook status, as JSON.
    async fn webhook_info(&self) -> Result<serde_json::Value>;
}
