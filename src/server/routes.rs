use super::register_webhook;
use crate::bot::Dispatcher;
use crate::channels::ChatPlatform;
use crate::channels::telegram::event_from_update;
use crate::config::WEBHOOK_PATH;
use crate::error::WebhookError;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;
use teloxide::types::Update;
use tower_http::trace::TraceLayer;

pub const SETUP_WEBHOOK_PATH: &str = "/api/setup-webhook";

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub platform: Arc<dyn ChatPlatform>,
    /// Public URL Telegram should push updates to
    pub webhook_url: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route(WEBHOOK_PATH, get(health).post(receive_update))
        .route(SETUP_WEBHOOK_PATH, get(setup_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /api/webhook - Handle one Telegram update
///
/// Answers only after dispatch completes. Failures inside the bot are replied
/// to in chat and still acknowledged here so Telegram does not redeliver.
/// Only a body that is not JSON at all is rejected; JSON that is not an update
/// the bot understands is acknowledged and dropped.
async fn receive_update(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, WebhookError> {
    serde_json::from_slice::<Value>(&body)?;

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            if let Some(event) = event_from_update(update) {
                state.dispatcher.dispatch(event).await;
            }
        }
        Err(e) => tracing::warn!("Webhook: ignoring unrecognised update: {}", e),
    }

    Ok(Json(json!({ "ok": true })))
}

/// GET /api/webhook - Liveness check
async fn health() -> Json<Value> {
    Json(json!({
        "status": "Telegram Bot Webhook is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /api/setup-webhook - Point Telegram at this server
async fn setup_webhook(State(state): State<AppState>) -> Result<Json<Value>, WebhookError> {
    let info = register_webhook(state.platform.as_ref(), &state.webhook_url)
        .await
        .map_err(WebhookError::Setup)?;

    Ok(Json(json!({
        "success": true,
        "message": "Webhook configured successfully",
        "webhookUrl": state.webhook_url,
        "webhookInfo": info,
    })))
}

/// GET / - Setup instructions
async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ar">
<head>
  <meta charset="utf-8">
  <title>Telegram AI Agent</title>
  <style>
    body { min-height: 100vh; margin: 0; display: flex; align-items: center; justify-content: center;
           font-family: Arial, sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
    .card { background: white; border-radius: 20px; padding: 40px; max-width: 600px; text-align: center;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3); }
    .features { direction: rtl; text-align: right; color: #666; line-height: 1.6; }
    .setup { background: #f7f7f7; border-radius: 10px; padding: 20px; text-align: left; font-size: 14px; }
  </style>
</head>
<body>
  <div class="card">
    <div style="font-size: 64px">🤖</div>
    <h1>Telegram AI Agent</h1>
    <p class="features">
      مساعد ذكي متقدم لتليجرام مع قدرات:<br>
      ✅ الرد التلقائي على الرسائل<br>
      ✅ الإجابة الذكية باستخدام AI<br>
      ✅ التعامل مع الرسائل الصوتية<br>
      ✅ التحقق من المدفوعات<br>
      ✅ إرسال المنتجات الرقمية تلقائياً
    </p>
    <div class="setup">
      <h2>Setup Instructions</h2>
      <ol>
        <li>Create a Telegram bot via @BotFather</li>
        <li>Get your OpenAI API key</li>
        <li>Set <code>TELEGRAM_BOT_TOKEN</code>, <code>OPENAI_API_KEY</code>, <code>WEBHOOK_DOMAIN</code>,
            <code>PRODUCT_PRICE</code>, <code>DIGITAL_PRODUCT_URL</code></li>
        <li>Visit <code>/api/setup-webhook</code> to configure</li>
        <li>Start chatting with your bot!</li>
      </ol>
    </div>
  </div>
</body>
</html>
"#;
