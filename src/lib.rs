//! Shopkeep - Telegram Customer-Service Bot
//!
//! A webhook-driven Telegram bot that answers customer questions through an
//! OpenAI-compatible chat-completion API, verifies payment amounts against a
//! configured price, and delivers a digital product link.
//!
//! ## Features
//!
//! - **AI replies:** Free text is forwarded to the completion API with a short,
//!   per-user conversation history
//! - **Payment check:** `/payment <amount>` compares the amount to the product price
//! - **Canned replies:** Voice notes, video notes and shared contacts get fixed answers
//! - **Webhook server:** Axum endpoints for updates, webhook registration and health
//!
//! ## Quick Start
//!
//! ```bash
//! # Webhook server (default)
//! shopkeep serve
//!
//! # Register the webhook with Telegram
//! shopkeep set-webhook
//!
//! # Local development without a public domain
//! shopkeep poll
//! ```

pub mod bot;
pub mod channels;
pub mod cli;
pub mod completion;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod payment;
pub mod server;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use error::WebhookError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
