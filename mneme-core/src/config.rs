//! Configuration types for the Mneme session manager

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a Mneme session
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MnemeConfig {
    /// Session and compaction configuration
    pub session: SessionConfig,

    /// LLM provider configuration (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LLMProviderConfig>,

    /// Transcript persistence configuration
    pub persistence: PersistenceConfig,
}

/// Session and compaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Conversational message count (user + assistant) at which the
    /// transcript is compacted
    #[serde(default = "default_compact_threshold")]
    pub compact_threshold: usize,

    /// Number of trailing transcript messages retained after compaction
    #[serde(default = "default_keep_recent")]
    pub keep_recent: usize,

    /// Fixed system instruction prepended to every inference call
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_compact_threshold() -> usize {
    12
}

fn default_keep_recent() -> usize {
    6
}

fn default_system_prompt() -> String {
    "You are an AI-powered study assistant for Computer Science (AI/ML). \
     Explain step-by-step with clear examples. If coding is requested, \
     provide runnable snippets. Be concise but helpful."
        .to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            compact_threshold: default_compact_threshold(),
            keep_recent: default_keep_recent(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMProviderConfig {
    /// Provider type
    pub provider: LLMProviderKind,

    /// Model name
    #[serde(default)]
    pub model: String,

    /// API key (if needed, prefer env vars)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL (for custom endpoints, e.g., Ollama)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProviderKind {
    Ollama,
    OpenAI,
}

/// Transcript persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Human-readable conversation log
    #[serde(default = "default_text_path")]
    pub text_path: PathBuf,

    /// Line-delimited structured records
    #[serde(default = "default_jsonl_path")]
    pub jsonl_path: PathBuf,
}

fn default_text_path() -> PathBuf {
    PathBuf::from("conversation.log")
}

fn default_jsonl_path() -> PathBuf {
    PathBuf::from("conversation.jsonl")
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            text_path: default_text_path(),
            jsonl_path: default_jsonl_path(),
        }
    }
}

impl MnemeConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Loads in this order:
    /// 1. Default configuration
    /// 2. Configuration file (mneme.toml or path from MNEME_CONFIG_PATH)
    /// 3. Environment variable overrides (MNEME_ prefix, `__` as the
    ///    section separator, e.g. MNEME_SESSION__COMPACT_THRESHOLD)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is invalid or the merged
    /// configuration fails validation.
    pub fn load() -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Serialized, Toml},
        };

        let mut figment = Figment::from(Serialized::defaults(MnemeConfig::default()))
            .merge(Toml::file("mneme.toml"));

        // Check for custom config path
        if let Ok(path) = std::env::var("MNEME_CONFIG_PATH") {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("MNEME_").split("__"));

        let config: MnemeConfig = figment.extract().map_err(|e| {
            crate::error::MnemeError::Configuration(format!("Failed to load configuration: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };

        let config: MnemeConfig = Figment::from(Serialized::defaults(MnemeConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| {
                crate::error::MnemeError::Configuration(format!(
                    "Failed to load configuration file: {}",
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.session.compact_threshold < 2 {
            return Err(crate::error::MnemeError::Configuration(format!(
                "compact_threshold must be at least 2, got {}",
                self.session.compact_threshold
            )));
        }

        if self.session.keep_recent == 0 {
            return Err(crate::error::MnemeError::Configuration(
                "keep_recent must be at least 1".to_string(),
            ));
        }

        if self.session.system_prompt.trim().is_empty() {
            return Err(crate::error::MnemeError::Configuration(
                "system_prompt must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
