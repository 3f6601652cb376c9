//! OpenAI-compatible chat completions client
//!
//! Works against any endpoint speaking the `/chat/completions` wire format;
//! the default configuration points at Groq.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::LlmConfig;
use crate::error::{Result, RouterError};
use crate::llm::client::LlmClient;
use crate::llm::types::{CompletionRequest, CompletionResponse, Message, Role, Usage};

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Chat completions API client
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a client from the `llm` config section with an explicit API key
    pub fn from_config(config: &LlmConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RouterError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the chat completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let model = request.model.as_deref().unwrap_or(&self.model);

        let system = (!request.system.is_empty()).then(|| Message::system(request.system.as_str()));
        let messages: Vec<Value> = system
            .iter()
            .chain(request.messages.iter())
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::System => "system",
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    "content": m.content
                })
            })
            .collect();

        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": request.temperature.unwrap_or(self.temperature),
            "max_tokens": request.max_tokens.unwrap_or(self.max_tokens),
        });

        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        body
    }

    /// Parse the API response into a CompletionResponse
    ///
    /// A missing message content is returned as empty text.
    fn parse_response(&self, body: Value) -> Result<CompletionResponse> {
        let choice = body
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| RouterError::Transport("response contained no choices".to_string()))?;

        let content = choice["message"]["content"].as_str().unwrap_or_default().to_string();

        let usage = body
            .get("usage")
            .map(|u| {
                Usage::new(
                    u["prompt_tokens"].as_u64().unwrap_or(0),
                    u["completion_tokens"].as_u64().unwrap_or(0),
                )
            })
            .unwrap_or_default();

        Ok(CompletionResponse { content, usage })
    }

    /// Send a request to the chat completions endpoint
    async fn send_request(&self, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RouterError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RouterError::Transport(format!(
                "API error {}: {}",
                status,
                truncate(&error_body, MAX_ERROR_BODY_CHARS)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RouterError::Transport(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_request(&request);
        let response = self.send_request(body).await?;
        let completion = self.parse_response(response)?;
        log::debug!(
            "Completion used {} tokens ({} in, {} out)",
            completion.usage.total(),
            completion.usage.input_tokens,
            completion.usage.output_tokens
        );
        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Keep the API key out of debug output
impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
