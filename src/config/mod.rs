//! Configuration Module
//!
//! Handles configuration loading, environment overrides, and fail-fast
//! validation. Configuration is read once at startup and never mutated.

use crate::completion::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Path the webhook endpoint is served on, relative to the public domain.
pub const WEBHOOK_PATH: &str = "/api/webhook";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Telegram bot configuration
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Chat-completion API configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// The digital product being sold
    #[serde(default)]
    pub product: ProductConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Public origin the webhook is reachable at, e.g. `https://bot.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key (will be loaded from env)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL (default: OpenAI)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name (default: gpt-3.5-turbo)
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Price threshold for `/payment` (default: 100)
    #[serde(default = "default_price")]
    pub price: f64,

    /// Download link delivered after a verified payment
    #[serde(default)]
    pub url: String,
}

fn default_price() -> f64 {
    100.0
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            price: default_price(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: "0.0.0.0")
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Listen port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.config/shopkeep/config.toml
    /// 3. Local config: ./shopkeep.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        if let Some(system_config_path) = Self::system_config_path()
            && system_config_path.exists()
        {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::merge_from_file(&system_config_path)?;
        }

        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::merge_from_file(&local_config_path)?;
        }

        config.apply_env_overrides()?;

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply environment overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let mut config = Self::merge_from_file(path)?;
        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Get the system config path: ~/.config/shopkeep/config.toml
    fn system_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shopkeep").join("config.toml"))
    }

    /// Get the local config path: ./shopkeep.toml
    fn local_config_path() -> PathBuf {
        PathBuf::from("./shopkeep.toml")
    }

    /// Load a TOML file; the file replaces whatever was loaded before it
    fn merge_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }

        if let Ok(domain) = std::env::var("WEBHOOK_DOMAIN") {
            self.telegram.webhook_domain = Some(domain);
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.completion.api_key = Some(api_key);
        }

        // OpenAI base URL (for compatible gateways)
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            self.completion.base_url = base_url;
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.completion.model = model;
        }

        if let Ok(price) = std::env::var("PRODUCT_PRICE") {
            self.product.price = price
                .trim()
                .parse()
                .with_context(|| format!("PRODUCT_PRICE is not a number: {:?}", price))?;
        }

        if let Ok(url) = std::env::var("DIGITAL_PRODUCT_URL") {
            self.product.url = url;
        }

        if let Ok(bind) = std::env::var("SHOPKEEP_BIND") {
            self.server.bind = bind;
        }

        if let Ok(port) = std::env::var("SHOPKEEP_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("SHOPKEEP_PORT is not a port number: {:?}", port))?;
        }

        if let Ok(log_level) = std::env::var("SHOPKEEP_LOG_LEVEL") {
            self.logging.level = log_level;
        }

        Ok(())
    }

    /// Validate configuration needed by every mode.
    ///
    /// Missing credentials fail here instead of surfacing later as failed API calls.
    pub fn validate(&self) -> Result<()> {
        tracing::debug!("Validating configuration...");

        self.bot_token()?;

        if non_empty(&self.completion.api_key).is_none() {
            anyhow::bail!("Completion API key is missing (set OPENAI_API_KEY or [completion] api_key)");
        }

        if self.completion.base_url.trim().is_empty() {
            anyhow::bail!("Completion base_url is empty");
        }

        if !self.product.price.is_finite() || self.product.price < 0.0 {
            anyhow::bail!(
                "Invalid product price: {}. Must be a non-negative number",
                self.product.price
            );
        }

        if self.product.url.trim().is_empty() {
            anyhow::bail!("Product URL is missing (set DIGITAL_PRODUCT_URL or [product] url)");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            );
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// The bot token, or an error if it is not configured.
    pub fn bot_token(&self) -> Result<&str> {
        non_empty(&self.telegram.bot_token).ok_or_else(|| {
            anyhow::anyhow!("Telegram bot token is missing (set TELEGRAM_BOT_TOKEN or [telegram] bot_token)")
        })
    }

    /// Completion API key; empty if unset (callers validate first).
    pub fn api_key(&self) -> &str {
        non_empty(&self.completion.api_key).unwrap_or_default()
    }

    /// Full public webhook URL: `<webhook_domain>/api/webhook`.
    pub fn webhook_url(&self) -> Result<String> {
        let domain = non_empty(&self.telegram.webhook_domain).ok_or_else(|| {
            anyhow::anyhow!("Webhook domain is missing (set WEBHOOK_DOMAIN or [telegram] webhook_domain)")
        })?;
        Ok(format!("{}{}", domain.trim_end_matches('/'), WEBHOOK_PATH))
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }

    /// Copy of the configuration with secrets replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.telegram.bot_token = copy.telegram.bot_token.as_deref().map(mask);
        copy.completion.api_key = copy.completion.api_key.as_deref().map(mask);
        copy
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}***", visible)
}
