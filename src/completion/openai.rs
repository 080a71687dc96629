//! OpenAI-compatible chat completions
//!
//! Talks to `POST {base_url}/chat/completions`. The base URL is configurable so
//! the same client works against OpenAI, compatible gateways, and test servers.

use super::error::{CompletionError, Result};
use super::{CompletionClient, EMPTY_REPLY, FALLBACK_REPLY, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::conversation::{ConversationTurn, Role};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Chat-completion client for OpenAI-compatible APIs
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different API root (no trailing `/chat/completions`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send one request. `Ok(None)` means the API answered without content.
    pub async fn request(&self, turns: &[ConversationTurn]) -> Result<Option<String>> {
        let body = ChatRequest {
            model: &self.model,
            messages: turns
                .iter()
                .map(|turn| ChatMessage {
                    role: turn.role,
                    content: &turn.text,
                })
                .collect(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        tracing::debug!(
            "Completion request: model={}, messages={}",
            self.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty());

        if let Some(usage) = parsed.usage {
            tracing::info!(
                "Completion response: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(content)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, turns: &[ConversationTurn]) -> String {
        match self.request(turns).await {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                tracing::warn!("Completion API returned no content");
                EMPTY_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!("Completion API error: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn turns() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::system("You are a shop assistant."),
            ConversationTurn::user("How much is it?"),
        ]
    }

    fn client_for(server: &mockito::Server) -> OpenAiClient {
        OpenAiClient::new("test-key".to_string()).with_base_url(server.url())
    }

    #[tokio::test]
    async fn test_complete_success_sends_fixed_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 500,
                "temperature": 0.7,
                "messages": [
                    {"role": "system", "content": "You are a shop assistant."},
                    {"role": "user", "content": "How much is it?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"It costs 100."}}],
                    "usage":{"prompt_tokens":12,"completion_tokens":4}}"#,
            )
            .create_async()
            .await;

        let reply = client_for(&server).complete(&turns()).await;

        mock.assert_async().await;
        assert_eq!(reply, "It costs 100.");
    }

    #[tokio::test]
    async fn test_request_api_error_carries_status_and_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.request(&turns()).await.unwrap_err();
        assert!(err.to_string().contains("401"), "unexpected error: {}", err);
        assert!(err.to_string().contains("Incorrect API key"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_server_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("Internal Server Error")
            .expect(1)
            .create_async()
            .await;

        let reply = client_for(&server).complete(&turns()).await;

        mock.assert_async().await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_complete_malformed_body_returns_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let reply = client_for(&server).complete(&turns()).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_complete_without_choices_returns_empty_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let reply = client_for(&server).complete(&turns()).await;
        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_complete_unreachable_host_returns_fallback() {
        let client = OpenAiClient::new("k".to_string()).with_base_url("http://127.0.0.1:1");
        let reply = client.complete(&turns()).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenAiClient::new("k".to_string()).with_base_url("http://localhost:8080/v1/");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
