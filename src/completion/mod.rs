//! Completion Client
//!
//! One chat-completion request per customer message. Failures never reach the
//! caller: they are logged and replaced by a fixed reply.

mod error;
mod openai;

pub use error::{CompletionError, Result};
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiClient};

use crate::conversation::ConversationTurn;
use async_trait::async_trait;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens per reply.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Reply used when the completion call fails.
pub const FALLBACK_REPLY: &str = "عذراً، حدث خطأ في معالجة طلبك. يرجى المحاولة مرة أخرى.";

/// Reply used when the API answers without any content.
pub const EMPTY_REPLY: &str = "عذراً، لم أتمكن من معالجة طلبك.";

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Produce the assistant reply for the given turns (system turn first).
    async fn complete(&self, turns: &[ConversationTurn]) -> String;
}
