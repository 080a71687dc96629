//! CLI subcommand implementations and config loading.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::bot::Dispatcher;
use crate::channels::ChatPlatform;
use crate::channels::telegram::{TelegramPlatform, TelegramPoller};
use crate::completion::OpenAiClient;
use crate::config::Config;
use crate::conversation::InMemoryConversationStore;
use crate::server::{self, AppState};

/// Load configuration from file or defaults
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        Config::load_from_path(path)
    } else {
        Config::load()
    }
}

/// Wire the store, completion client, and platform into a dispatcher.
fn build_dispatcher(config: &Config, platform: Arc<dyn ChatPlatform>) -> Arc<Dispatcher> {
    let completion = OpenAiClient::new(config.api_key().to_string())
        .with_base_url(config.completion.base_url.as_str())
        .with_model(config.completion.model.as_str());

    tracing::info!(
        "Completion model: {}, product price: {}",
        completion.model(),
        config.product.price
    );

    Arc::new(Dispatcher::new(
        Arc::new(InMemoryConversationStore::new()),
        Arc::new(completion),
        platform,
        config.product.clone(),
    ))
}

/// Run the webhook server
pub(crate) async fn cmd_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;
    let webhook_url = config.webhook_url()?;

    let platform: Arc<dyn ChatPlatform> = Arc::new(TelegramPlatform::new(config.bot_token()?));
    let dispatcher = build_dispatcher(&config, platform.clone());

    tracing::info!("Telegram webhook URL: {}", webhook_url);

    let state = AppState {
        dispatcher,
        platform,
        webhook_url,
    };
    server::serve(&config.bind_addr(), state).await
}

/// Run with long polling
pub(crate) async fn cmd_poll(config: Config) -> Result<()> {
    config.validate()?;

    let telegram = TelegramPlatform::new(config.bot_token()?);
    let bot = telegram.bot().clone();
    let dispatcher = build_dispatcher(&config, Arc::new(telegram));

    TelegramPoller::new(dispatcher).run(bot).await;
    Ok(())
}

/// Register the webhook once
pub(crate) async fn cmd_set_webhook(config: &Config) -> Result<()> {
    let webhook_url = config.webhook_url()?;
    let platform = TelegramPlatform::new(config.bot_token()?);

    let info = server::register_webhook(&platform, &webhook_url)
        .await
        .context("Failed to set up webhook")?;

    println!("✅ Webhook configured: {}", webhook_url);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Show configuration
pub(crate) fn cmd_config(config: &Config, show_secrets: bool) -> Result<()> {
    let rendered = if show_secrets {
        config.to_toml()?
    } else {
        config.redacted().to_toml()?
    };

    println!("{}", rendered);

    if let Err(e) = config.validate() {
        println!("⚠️  {}", e);
    }
    Ok(())
}
