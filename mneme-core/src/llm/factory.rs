//! Factory for creating LLM providers from configuration

use crate::config::{LLMProviderConfig, LLMProviderKind};
use crate::error::Result;
use crate::llm::LLMProvider;
use std::sync::Arc;

#[cfg(feature = "llm-ollama")]
use crate::llm::providers::ollama::OllamaProvider;

#[cfg(feature = "llm-openai")]
use crate::llm::providers::openai::OpenAIProvider;

/// Factory for creating LLM providers
pub struct LLMProviderFactory;

impl LLMProviderFactory {
    /// Create an LLM provider from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - LLM provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be created (e.g., missing API key)
    pub fn create(config: &LLMProviderConfig) -> Result<Arc<dyn LLMProvider>> {
        match config.provider {
            #[cfg(feature = "llm-ollama")]
            LLMProviderKind::Ollama => {
                let model = if !config.model.is_empty() {
                    Some(config.model.clone())
                } else {
                    None
                };

                let provider = if let Some(url) = config.base_url.clone() {
                    OllamaProvider::new(
                        model.unwrap_or_else(|| "qwen3:14b".to_string()),
                        Some(url),
                    )
                } else {
                    OllamaProvider::from_env(model)?
                };

                Ok(Arc::new(provider))
            }

            #[cfg(not(feature = "llm-ollama"))]
            LLMProviderKind::Ollama => Err(crate::error::MnemeError::Configuration(
                "Ollama provider requires 'llm-ollama' feature".to_string(),
            )),

            #[cfg(feature = "llm-openai")]
            LLMProviderKind::OpenAI => {
                let model = if !config.model.is_empty() {
                    Some(config.model.clone())
                } else {
                    None
                };

                let provider = if let Some(api_key) = &config.api_key {
                    let model_str = model
                        .or_else(|| std::env::var("OPENAI_MODEL").ok())
                        .unwrap_or_else(|| "gpt-4o-mini".to_string());

                    if let Some(base_url) = &config.base_url {
                        OpenAIProvider::with_base_url(api_key.clone(), model_str, base_url.clone())
                    } else {
                        OpenAIProvider::new(api_key.clone(), model_str)
                    }
                } else {
                    OpenAIProvider::from_env(model)?
                };

                Ok(Arc::new(provider))
            }

            #[cfg(not(feature = "llm-openai"))]
            LLMProviderKind::OpenAI => Err(crate::error::MnemeError::Configuration(
                "OpenAI provider requires 'llm-openai' feature".to_string(),
            )),
        }
    }

    /// Create from MnemeConfig (if LLM config is present)
    pub fn from_config(config: Option<&LLMProviderConfig>) -> Result<Option<Arc<dyn LLMProvider>>> {
        match config {
            Some(cfg) => Ok(Some(Self::create(cfg)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_none() {
        let provider = LLMProviderFactory::from_config(None).unwrap();
        assert!(provider.is_none());
    }

    #[cfg(feature = "llm-ollama")]
    #[test]
    fn test_create_ollama_with_base_url() {
        let config = LLMProviderConfig {
            provider: LLMProviderKind::Ollama,
            model: "qwen3:14b".to_string(),
            api_key: None,
            base_url: Some("http://localhost:11434".to_string()),
        };

        let provider = LLMProviderFactory::create(&config).unwrap();
        assert_eq!(provider.model_info().provider, "ollama");
    }

    #[cfg(feature = "llm-openai")]
    #[test]
    fn test_create_openai_with_api_key() {
        let config = LLMProviderConfig {
            provider: LLMProviderKind::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key: Some("test-key".to_string()),
            base_url: None,
        };

        let provider = LLMProviderFactory::create(&config).unwrap();
        assert_eq!(provider.model_info().provider, "openai");
    }
}
