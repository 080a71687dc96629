//! Telegram Bot Integration
//!
//! Outbound calls through the Telegram Bot API, classification of inbound
//! updates, and a long-polling runner for local development.

mod agent;
pub(crate) mod handler;

pub use agent::TelegramPoller;
pub use handler::{event_from_message, event_from_update};

use super::ChatPlatform;
use crate::utils::split_message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::{Bot, Requester};
use teloxide::types::{ChatAction, ChatId};

/// Telegram's per-message text limit.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// [`ChatPlatform`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// The underlying teloxide client.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        for chunk in split_message(text, TELEGRAM_MAX_MESSAGE_LEN) {
            self.bot
                .send_message(ChatId(chat_id), chunk)
                .await
                .with_context(|| format!("Failed to send message to chat {}", chat_id))?;
        }
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .context("Failed to send typing action")?;
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<()> {
        let url = reqwest::Url::parse(url)
            .with_context(|| format!("Invalid webhook URL: {}", url))?;
        self.bot
            .set_webhook(url)
            .await
            .context("Telegram rejected setWebhook")?;
        Ok(())
    }

    async fn webhook_info(&self) -> Result<serde_json::Value> {
        let info = self
            .bot
            .get_webhook_info()
            .await
            .context("Failed to fetch webhook info")?;
        Ok(serde_json::to_value(&info)?)
    }
}
