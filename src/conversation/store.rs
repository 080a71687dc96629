//! Conversation Store
//!
//! Keyed by Telegram user ID. Each operation takes the lock on its own, so a
//! read-modify-write sequence spanning several calls is not atomic; two
//! concurrent messages from the same user may interleave their turns.

use super::{Conversation, ConversationTurn, Role};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Lockable key-value store of per-user conversations.
///
/// All operations are total: a missing user behaves like an empty conversation.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Snapshot of the user's conversation (empty if none exists).
    async fn get(&self, user_id: i64) -> Conversation;

    /// Start the conversation with a system turn if it has no turns yet.
    async fn append_system_if_empty(&self, user_id: i64, system_text: &str);

    /// Append a turn and trim to the system turn plus the latest exchange turns.
    async fn append_turn(&self, user_id: i64, role: Role, text: &str);

    /// Forget the user's conversation entirely.
    async fn reset(&self, user_id: i64);
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: Mutex<HashMap<i64, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored conversation.
    pub async fn user_count(&self) -> usize {
        self.conversations.lock().await.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, user_id: i64) -> Conversation {
        self.conversations
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn append_system_if_empty(&self, user_id: i64, system_text: &str) {
        let mut map = self.conversations.lock().await;
        map.entry(user_id)
            .or_default()
            .push_system_if_empty(system_text);
    }

    async fn append_turn(&self, user_id: i64, role: Role, text: &str) {
        let mut map = self.conversations.lock().await;
        map.entry(user_id)
            .or_default()
            .push(ConversationTurn::new(role, text));
    }

    async fn reset(&self, user_id: i64) {
        if self.conversations.lock().await.remove(&user_id).is_some() {
            tracing::debug!("Conversation reset for user {}", user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::MAX_TURNS;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_get_unknown_user_is_empty() {
        let store = InMemoryConversationStore::new();
        assert!(store.get(42).await.is_empty());
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_reset_clears_conversation() {
        let store = InMemoryConversationStore::new();
        store.append_system_if_empty(7, "prompt").await;
        store.append_turn(7, Role::User, "hello").await;
        store.append_turn(7, Role::Assistant, "hi").await;

        store.reset(7).await;

        assert!(store.get(7).await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_unknown_user_is_noop() {
        let store = InMemoryConversationStore::new();
        store.reset(99).await;
        assert!(store.get(99).await.is_empty());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryConversationStore::new();
        store.append_system_if_empty(1, "prompt").await;
        store.append_turn(1, Role::User, "from one").await;
        store.append_system_if_empty(2, "prompt").await;

        assert_eq!(store.get(1).await.len(), 2);
        assert_eq!(store.get(2).await.len(), 1);

        store.reset(1).await;
        assert_eq!(store.get(2).await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_snapshot() {
        let store = InMemoryConversationStore::new();
        store.append_system_if_empty(3, "prompt").await;
        let snapshot = store.get(3).await;
        store.append_turn(3, Role::User, "later").await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.get(3).await.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_history_is_capped_and_keeps_system_turn(count in 11usize..60) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let store = InMemoryConversationStore::new();
                for i in 0..count {
                    store.append_system_if_empty(5, "system prompt").await;
                    store.append_turn(5, Role::User, &format!("question {}", i)).await;
                    store.append_turn(5, Role::Assistant, &format!("answer {}", i)).await;

                    let conversation = store.get(5).await;
                    prop_assert!(conversation.len() <= MAX_TURNS);
                    prop_assert_eq!(conversation.turns()[0].role, Role::System);
                    prop_assert_eq!(conversation.turns()[0].text.as_str(), "system prompt");
                }
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
