//! Completion API errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompletionError>;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}
