//! Inbound chat events
//!
//! Platform-neutral form of a message after it has been classified, so the
//! dispatcher can match on it exhaustively.

/// Prefix marking a bot command.
pub const COMMAND_PREFIX: char = '/';

/// One inbound message from a customer
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    /// Sender's user ID (conversation key)
    pub user_id: i64,
    /// Chat to reply into
    pub chat_id: i64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Command(Command),
    /// Plain text that is not a command
    Text(String),
    Voice,
    VideoNote,
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/start`: reset the conversation
    Start,
    Help,
    Price,
    /// `/payment <amount>`; arguments are the space-separated words after the command
    Payment { args: Vec<String> },
    /// Any other `/...` text; never forwarded to the model
    Unknown(String),
}

impl EventKind {
    /// Classify a text message as a command or free text.
    pub fn from_text(text: &str) -> Self {
        if !text.starts_with(COMMAND_PREFIX) {
            return Self::Text(text.to_string());
        }

        // The command name ends at any whitespace; arguments are split on spaces only
        let head_end = text.find(char::is_whitespace).unwrap_or(text.len());
        let head = &text[COMMAND_PREFIX.len_utf8()..head_end];
        // `/price@shop_bot` addresses this bot in group chats
        let name = head.split('@').next().unwrap_or_default();
        let words = text.split(' ').skip(1);

        let command = match name {
            "start" => Command::Start,
            "help" => Command::Help,
            "price" => Command::Price,
            "payment" => Command::Payment {
                args: words.map(str::to_string).collect(),
            },
            other => Command::Unknown(other.to_string()),
        };
        Self::Command(command)
    }
}
