//! In-process fakes for the platform and completion seams.

use crate::channels::ChatPlatform;
use crate::completion::CompletionClient;
use crate::conversation::ConversationTurn;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Records outgoing messages; send attempts listed in `fail_at` return an error.
#[derive(Default)]
pub struct RecordingPlatform {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub attempts: AtomicUsize,
    pub typing: AtomicUsize,
    pub fail_at: Vec<usize>,
    pub fail_typing: bool,
    pub fail_webhook: bool,
    pub webhooks: Mutex<Vec<String>>,
}

impl RecordingPlatform {
    pub fn failing_first(sends: usize) -> Self {
        Self {
            fail_at: (0..sends).collect(),
            ..Default::default()
        }
    }

    pub async fn texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|(_, t)| t.clone()).collect()
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_at.contains(&attempt) {
            anyhow::bail!("Telegram API unavailable");
        }
        self.sent.lock().await.push((chat_id, text.to_string()));
        Ok(())
    }

    async fn send_typing(&self, _chat_id: i64) -> Result<()> {
        if self.fail_typing {
            anyhow::bail!("typing failed");
        }
        self.typing.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<()> {
        if self.fail_webhook {
            anyhow::bail!("Unauthorized");
        }
        self.webhooks.lock().await.push(url.to_string());
        Ok(())
    }

    async fn webhook_info(&self) -> Result<serde_json::Value> {
        let url = self.webhooks.lock().await.last().cloned().unwrap_or_default();
        Ok(serde_json::json!({ "url": url, "pending_update_count": 0 }))
    }
}

/// Echoes the last turn (or a fixed reply) and remembers what it was given.
#[derive(Default)]
pub struct ScriptedCompletion {
    pub calls: Mutex<Vec<Vec<ConversationTurn>>>,
    pub reply: Option<String>,
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, turns: &[ConversationTurn]) -> String {
        self.calls.lock().await.push(turns.to_vec());
        match &self.reply {
            Some(reply) => reply.clone(),
            None => format!("echo: {}", turns.last().map(|t| t.text.as_str()).unwrap_or("")),
        }
    }
}
