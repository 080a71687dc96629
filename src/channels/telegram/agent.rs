//! Telegram Long-Polling Runner
//!
//! Receives updates with `getUpdates` instead of a webhook and feeds them
//! through the same dispatcher as the HTTP endpoint.

use super::handler::event_from_message;
use crate::bot::Dispatcher;
use std::sync::Arc;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::{Bot, Message, Requester, Update, respond};

pub struct TelegramPoller {
    dispatcher: Arc<Dispatcher>,
}

impl TelegramPoller {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Poll until Ctrl+C.
    pub async fn run(self, bot: Bot) {
        match bot.get_me().await {
            Ok(me) => {
                if let Some(ref username) = me.username {
                    tracing::info!("Telegram: polling as @{}", username);
                }
            }
            Err(e) => {
                tracing::warn!("Telegram: failed to get bot info (get_me): {}", e);
            }
        }

        // getUpdates is refused while a webhook is registered
        if let Err(e) = bot.delete_webhook().await {
            tracing::warn!("Telegram: failed to delete webhook: {}", e);
        }

        let dispatcher = self.dispatcher.clone();
        let handler = Update::filter_message().endpoint(move |msg: Message| {
            let dispatcher = dispatcher.clone();
            async move {
                if let Some(event) = event_from_message(&msg) {
                    dispatcher.dispatch(event).await;
                }
                respond(())
            }
        });

        teloxide::dispatching::Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
