//! Event Dispatcher
//!
//! Routes one classified event to its handler. Errors inside a handler are
//! caught here, logged, and answered with a single generic reply; nothing is
//! propagated to the webhook layer.

use super::event::{Command, EventKind, InboundEvent};
use super::messages;
use crate::channels::ChatPlatform;
use crate::completion::CompletionClient;
use crate::config::ProductConfig;
use crate::conversation::{ConversationStore, Role};
use crate::payment;
use anyhow::Result;
use std::sync::Arc;

pub struct Dispatcher {
    store: Arc<dyn ConversationStore>,
    completion: Arc<dyn CompletionClient>,
    platform: Arc<dyn ChatPlatform>,
    product: ProductConfig,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        completion: Arc<dyn CompletionClient>,
        platform: Arc<dyn ChatPlatform>,
        product: ProductConfig,
    ) -> Self {
        Self {
            store,
            completion,
            platform,
            product,
        }
    }

    /// Handle one event to completion. Never fails.
    pub async fn dispatch(&self, event: InboundEvent) {
        if let Err(e) = self.handle(&event).await {
            tracing::error!("Bot error for user {}: {:#}", event.user_id, e);
            if let Err(e) = self
                .platform
                .send_text(event.chat_id, messages::UNEXPECTED_ERROR)
                .await
            {
                tracing::error!("Failed to send error reply to chat {}: {:#}", event.chat_id, e);
            }
        }
    }

    async fn handle(&self, event: &InboundEvent) -> Result<()> {
        let chat_id = event.chat_id;
        let price = self.product.price;

        match &event.kind {
            EventKind::Command(Command::Start) => {
                self.store.reset(event.user_id).await;
                tracing::info!("/start from user {}", event.user_id);
                self.platform.send_text(chat_id, messages::WELCOME).await
            }
            EventKind::Command(Command::Help) => {
                self.platform.send_text(chat_id, messages::HELP).await
            }
            EventKind::Command(Command::Price) => {
                self.platform.send_text(chat_id, &messages::price(price)).await
            }
            EventKind::Command(Command::Payment { args }) => {
                self.handle_payment(event, args).await
            }
            EventKind::Command(Command::Unknown(name)) => {
                tracing::debug!("Ignoring unknown command /{} from user {}", name, event.user_id);
                Ok(())
            }
            EventKind::Text(text) => self.handle_text(event, text).await,
            EventKind::Voice => {
                self.platform.send_text(chat_id, messages::VOICE_UNSUPPORTED).await
            }
            EventKind::VideoNote => {
                self.platform.send_text(chat_id, messages::VIDEO_UNSUPPORTED).await
            }
            EventKind::Contact => {
                self.platform.send_text(chat_id, messages::CONTACT_RECEIVED).await
            }
        }
    }

    async fn handle_payment(&self, event: &InboundEvent, args: &[String]) -> Result<()> {
        let chat_id = event.chat_id;
        let price = self.product.price;

        let Some(arg) = args.first() else {
            return self
                .platform
                .send_text(chat_id, &messages::payment_usage(price))
                .await;
        };

        let Some(amount) = payment::parse_amount(arg) else {
            return self.platform.send_text(chat_id, messages::INVALID_AMOUNT).await;
        };

        if payment::verify(amount, price) {
            tracing::info!(
                "Payment verified for user {}: amount={}, price={}",
                event.user_id,
                amount,
                price
            );
            self.platform
                .send_text(chat_id, &messages::payment_verified(amount, price))
                .await?;
            self.send_product(chat_id).await;
        } else {
            let shortfall = payment::shortfall(amount, price);
            tracing::info!(
                "Payment insufficient for user {}: amount={}, shortfall={}",
                event.user_id,
                amount,
                shortfall
            );
            self.platform
                .send_text(
                    chat_id,
                    &messages::payment_insufficient(amount, price, &shortfall),
                )
                .await?;
        }
        Ok(())
    }

    /// Deliver the product link. Send failures are logged and dropped.
    async fn send_product(&self, chat_id: i64) {
        let text = messages::product_delivery(&self.product.url);
        if let Err(e) = self.platform.send_text(chat_id, &text).await {
            tracing::error!("Failed to send product to chat {}: {:#}", chat_id, e);
        }
    }

    async fn handle_text(&self, event: &InboundEvent, text: &str) -> Result<()> {
        if let Err(e) = self.answer_with_model(event, text).await {
            tracing::error!("Error handling message from user {}: {:#}", event.user_id, e);
            self.platform
                .send_text(event.chat_id, messages::TEXT_FAILURE)
                .await?;
        }
        Ok(())
    }

    async fn answer_with_model(&self, event: &InboundEvent, text: &str) -> Result<()> {
        let user_id = event.user_id;

        tracing::info!(
            "Text from user {}: {}",
            user_id,
            crate::utils::truncate_str(text, 50)
        );

        if let Err(e) = self.platform.send_typing(event.chat_id).await {
            tracing::warn!("Failed to send typing indicator to chat {}: {:#}", event.chat_id, e);
        }

        self.store
            .append_system_if_empty(user_id, &messages::system_prompt(self.product.price))
            .await;
        self.store.append_turn(user_id, Role::User, text).await;

        let conversation = self.store.get(user_id).await;
        let reply = self.completion.complete(conversation.turns()).await;

        self.store.append_turn(user_id, Role::Assistant, &reply).await;
        self.platform.send_text(event.chat_id, &reply).await
    }
}
