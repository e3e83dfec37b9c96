//! OpenAI LLM provider implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{MnemeError, Result};
use crate::llm::{
    flatten_content, LLMProvider, LLMRequest, LLMResponse, Message, MessageRole, ModelInfo,
    TokenUsage,
};

/// OpenAI LLM provider (GPT-4o, GPT-4o mini, etc.).
pub struct OpenAIProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create with a custom base URL (for Azure OpenAI or compatible APIs).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Create from environment variables.
    ///
    /// Reads from:
    /// - `OPENAI_API_KEY` - API key (required)
    /// - `OPENAI_MODEL` - Model name (optional, defaults to "gpt-4o-mini")
    /// - `OPENAI_BASE_URL` - Custom base URL (optional)
    ///
    /// # Arguments
    ///
    /// * `model` - Model name (overrides OPENAI_MODEL if provided)
    ///
    /// # Errors
    ///
    /// Returns an error if OPENAI_API_KEY is not set.
    pub fn from_env(model: Option<impl Into<String>>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            MnemeError::Configuration("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let model = model
            .map(|m| m.into())
            .or_else(|| std::env::var("OPENAI_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string());

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        })
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessageResponse,
}

/// Response content is kept as a raw JSON value: some compatible endpoints
/// return a plain string, others a list of content parts. Flattening
/// happens before the content is handed back to the session layer.
#[derive(Deserialize)]
struct OpenAIMessageResponse {
    #[serde(default)]
    content: serde_json::Value,
}

#[derive(Deserialize)]
struct OpenAIUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

#[derive(Deserialize)]
struct OpenAIError {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

fn convert_messages(messages: &[Message]) -> Vec<OpenAIMessage> {
    messages
        .iter()
        .map(|m| OpenAIMessage {
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
impl LLMProvider for OpenAIProvider {
    async fn generate_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        let openai_request = OpenAIRequest {
            model: self.model.clone(),
            messages: convert_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| MnemeError::Gateway(format!("Failed to send request to OpenAI: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Try to parse as OpenAI error format
            if let Ok(error) = serde_json::from_str::<OpenAIError>(&text) {
                return Err(MnemeError::Gateway(format!(
                    "OpenAI API error ({}): {}",
                    error.error.error_type.unwrap_or_else(|| status.to_string()),
                    error.error.message
                )));
            }

            return Err(MnemeError::Gateway(format!(
                "OpenAI API error ({}): {}",
                status, text
            )));
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| MnemeError::Gateway(format!("Failed to parse OpenAI response: {}", e)))?;

        let Some(choice) = openai_response.choices.first() else {
            return Err(MnemeError::Gateway(
                "OpenAI API returned no choices".to_string(),
            ));
        };

        let content = flatten_content(&choice.message.content);

        let usage = openai_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LLMResponse { content, usage })
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "openai".to_string(),
            model_name: self.model.clone(),
        }
    }
}
