//! Webhook HTTP Server
//!
//! Axum server exposing the Telegram webhook, webhook registration, health,
//! and a static landing page.

mod routes;

pub use routes::{AppState, create_router};

use crate::channels::ChatPlatform;
use anyhow::{Context, Result};

/// Register `url` with the platform and return its reported webhook status.
pub async fn register_webhook(
    platform: &dyn ChatPlatform,
    url: &str,
) -> Result<serde_json::Value> {
    platform.set_webhook(url).await?;
    tracing::info!("Webhook registered: {}", url);
    platform.webhook_info().await
}

/// Serve the router on `bind_addr` until Ctrl+C.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!("Webhook server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
