//! CLI Module
//!
//! Command-line interface for Shopkeep using Clap v4.

mod commands;

pub use commands::load_config;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

/// Shopkeep - Telegram customer-service bot
#[derive(Parser, Debug)]
#[command(name = "shopkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (debug level plus a rolling log file)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the webhook HTTP server (default)
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Receive updates by long polling instead of a webhook
    Poll,

    /// Register the webhook URL with Telegram and print its status
    SetWebhook,

    /// Show the effective configuration
    Config {
        /// Show secrets instead of masking them
        #[arg(short, long)]
        show_secrets: bool,
    },
}

/// Run the selected subcommand.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        None => commands::cmd_serve(config, None).await,
        Some(Commands::Serve { port }) => commands::cmd_serve(config, port).await,
        Some(Commands::Poll) => commands::cmd_poll(config).await,
        Some(Commands::SetWebhook) => commands::cmd_set_webhook(&config).await,
        Some(Commands::Config { show_secrets }) => commands::cmd_config(&config, show_secrets),
    }
}
