use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// String form used in structured transcript records
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a system-role message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant-role message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// Whether this message is a conversational turn (user or assistant),
    /// as opposed to a system instruction or marker
    pub fn is_conversational(&self) -> bool {
        matches!(self.role, MessageRole::User | MessageRole::Assistant)
    }
}

/// Flatten gateway response content to plain text.
///
/// Providers sometimes return content as a list of structured parts rather
/// than a single string. Text parts are concatenated in their original
/// order, joined with newlines; null parts are dropped. Plain strings pass
/// through unchanged, so flattening already-flat content is a no-op.
pub fn flatten_content(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(parts) => parts
            .iter()
            .filter_map(|part| match part {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Object(obj) => match obj.get("text") {
                    Some(serde_json::Value::String(s)) => Some(s.clone()),
                    _ => Some(part.to_string()),
                },
                other => Some(other.to_string()),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Request to an LLM provider
#[derive(Debug, Clone)]
pub struct LLMRequest {
    /// Messages in the conversation, in order
    pub messages: Vec<Message>,

    /// Temperature for generation (0.0-2.0)
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    pub max_tokens: Option<usize>,
}

impl LLMRequest {
    /// Create a request from an ordered message sequence
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Builder: set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    /// Builder: set max tokens
    pub fn with_max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// Response from an LLM provider
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Generated content, normalized to plain text
    pub content: String,

    /// Token usage information
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub provider: String,
    pub model_name: String,
}

/// Trait for LLM provider implementations.
///
/// This is the inference gateway boundary: one request, one response, no
/// retry, no streaming. Implementors handle the actual model calls
/// (Ollama, OpenAI, etc.) and surface every failure — including any
/// provider-internal timeout — as a gateway error.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a response for an ordered message sequence.
    async fn generate_request(&self, request: &LLMRequest) -> Result<LLMResponse>;

    /// Get model information
    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "unknown".to_string(),
            model_name: "unknown".to_string(),
        }
    }
}

/// Stub LLM provider (always fails).
///
/// Useful as a placeholder when no provider is configured and for
/// exercising the session manager's degraded paths, which must keep every
/// cycle alive under total inference unavailability.
pub struct StubLLMProvider;

#[async_trait]
impl LLMProvider for StubLLMProvider {
    async fn generate_request(&self, _request: &LLMRequest) -> Result<LLMResponse> {
        Err(crate::error::MnemeError::Gateway(
            "LLM provider not configured. Implement the LLMProvider trait for your LLM".to_string(),
        ))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "stub".to_string(),
            model_name: "none".to_string(),
        }
    }
}

pub mod factory;
pub mod providers;

pub use factory::LLMProviderFactory;
