//! Conversation History
//!
//! Per-user chat turns kept for the completion API, plus the store that owns
//! them for the lifetime of the process.

mod store;

pub use store::{ConversationStore, InMemoryConversationStore};

use serde::{Deserialize, Serialize};

/// Maximum number of turns kept after the system turn.
pub const MAX_EXCHANGE_TURNS: usize = 10;

/// Maximum stored conversation length (system turn + exchange turns).
pub const MAX_TURNS: usize = MAX_EXCHANGE_TURNS + 1;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

/// Ordered turns owned by a single user.
///
/// When non-empty, turn 0 is the system prompt. The length never exceeds
/// [`MAX_TURNS`]; appending past the cap drops the oldest exchange turns and
/// keeps the system turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Insert the system turn if nothing has been said yet.
    pub fn push_system_if_empty(&mut self, text: &str) {
        if self.turns.is_empty() {
            self.turns.push(ConversationTurn::system(text));
        }
    }

    /// Append a turn, then trim to turn 0 plus the last [`MAX_EXCHANGE_TURNS`].
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(1..=excess);
        }
    }
}
