//! Chat-completion HTTP client.
//!
//! Talks to an Ollama-compatible API at /api/chat. The model and base URL
//! come from `AI_MODEL` / `AI_URL`, defaulting to a local Ollama.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default chat API URL.
pub const DEFAULT_AI_URL: &str = "http://localhost:11434";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// One turn in a chat exchange. `role` is "system", "user", or "assistant".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// Chat client.
#[derive(Clone)]
pub struct AiClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

impl AiClient {
    /// Create a new chat client with specified URL and model.
    pub fn new(base_url: &str, model: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }

    /// Create a client from `AI_URL` / `AI_MODEL`, with local defaults.
    pub fn from_env() -> Self {
        let url = std::env::var("AI_URL").unwrap_or_else(|_| DEFAULT_AI_URL.to_string());
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(&url, &model)
    }

    /// Send a chat exchange and return the assistant's reply text.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };

        let response = self.client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to connect to the AI backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("AI API error ({}): {}", status, body);
        }

        let result: ChatResponse = response
            .json()
            .await
            .context("Failed to parse AI response")?;

        debug!(chars = result.message.content.len(), "Received chat reply");

        Ok(result.message.content)
    }

    /// Check if the AI service is reachable and the model is available.
    pub async fn health_check(&self) -> Result<bool> {
        let response = self.client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let text = resp.text().await.unwrap_or_default();
                Ok(text.contains(&self.model))
            }
            _ => Ok(false),
        }
    }
}
