//! Ollama LLM provider implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{MnemeError, Result};
use crate::llm::{LLMProvider, LLMRequest, LLMResponse, Message, MessageRole, ModelInfo, TokenUsage};

/// Ollama LLM provider (local, free, runs on your machine).
pub struct OllamaProvider {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Model name (e.g., "qwen3:14b")
    /// * `base_url` - Base URL for Ollama API (defaults to "http://localhost:11434")
    pub fn new(model: impl Into<String>, base_url: Option<impl Into<String>>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            base_url: base_url
                .map(|u| u.into())
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
        }
    }

    /// Create from environment variables.
    ///
    /// Reads from:
    /// - `OLLAMA_MODEL` - Model name (optional, defaults to "qwen3:14b")
    /// - `OLLAMA_BASE_URL` - Base URL (optional, defaults to "http://localhost:11434")
    ///
    /// # Arguments
    ///
    /// * `model` - Model name (overrides OLLAMA_MODEL if provided)
    pub fn from_env(model: Option<impl Into<String>>) -> Result<Self> {
        let model = model
            .map(|m| m.into())
            .or_else(|| std::env::var("OLLAMA_MODEL").ok())
            .unwrap_or_else(|| "qwen3:14b".to_string());

        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());

        Ok(Self::new(model, Some(base_url)))
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: Option<f32>,
    num_predict: Option<usize>,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: OllamaMessageResponse,
    #[serde(default)]
    prompt_eval_count: Option<usize>,
    #[serde(default)]
    eval_count: Option<usize>,
}

#[derive(Deserialize)]
struct OllamaMessageResponse {
    content: String,
}

fn convert_messages(messages: &[Message]) -> Vec<OllamaMessage> {
    messages
        .iter()
        .map(|m| OllamaMessage {
            role: match m.role {
                MessageRole::System => "system".to_string(),
                MessageRole::User => "user".to_string(),
                MessageRole::Assistant => "assistant".to_string(),
            },
            content: m.content.clone(),
        })
        .collect()
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn generate_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        let ollama_request = OllamaRequest {
            model: self.model.clone(),
            messages: convert_messages(&request.messages),
            stream: false,
            options: Some(OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            }),
        };

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                MnemeError::Gateway(format!(
                    "Failed to send request to Ollama: {}. Make sure Ollama is running.",
                    e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MnemeError::Gateway(format!(
                "Ollama API error ({}): {}",
                status, text
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| MnemeError::Gateway(format!("Failed to parse Ollama response: {}", e)))?;

        let content = ollama_response.message.content.trim().to_string();

        let usage = if let (Some(prompt_tokens), Some(completion_tokens)) =
            (ollama_response.prompt_eval_count, ollama_response.eval_count)
        {
            Some(TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            })
        } else {
            None
        };

        Ok(LLMResponse { content, usage })
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "ollama".to_string(),
            model_name: self.model.clone(),
        }
    }
}
