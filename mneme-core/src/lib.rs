//! # Mneme - Conversational Session Management with Compaction
//!
//! Mneme (Μνήμη) sits between a user-facing chat loop and an LLM
//! inference endpoint. It maintains a growing transcript of turns,
//! decides when the transcript has grown large enough to compact,
//! condenses earlier turns into a cumulative memory, and keeps the active
//! context bounded so each model call stays a manageable size.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mneme_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = MnemeConfig::load()?;
//!     let llm = LLMProviderFactory::from_config(config.llm.as_ref())?
//!         .unwrap_or_else(|| Arc::new(StubLLMProvider));
//!
//!     let mut controller = SessionController::new(&config.session, llm);
//!     let outcome = controller.handle_turn("Explain ownership in Rust").await;
//!     println!("AI: {}", outcome.reply);
//!
//!     TranscriptWriter::new(&config.persistence).write(&controller.into_state())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! One user input drives one two-phase cycle: the turn processor appends
//! the user message and the model's reply, the compaction policy counts
//! conversational messages against its threshold, and when the threshold
//! is crossed the compactor summarizes the whole transcript into memory
//! and truncates it behind a marker. Gateway failures never abort a
//! cycle; they degrade into synthetic message content.
//!
//! ## Feature Flags
//!
//! - `llm-ollama`: Ollama provider (local models)
//! - `llm-openai`: OpenAI / compatible provider

pub mod config;
pub mod error;
pub mod llm;
pub mod persistence;
pub mod session;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        LLMProviderConfig, LLMProviderKind, MnemeConfig, PersistenceConfig, SessionConfig,
    };
    pub use crate::error::{MnemeError, Result};
    pub use crate::llm::{
        flatten_content, LLMProvider, LLMProviderFactory, LLMRequest, LLMResponse, Message,
        MessageRole, ModelInfo, StubLLMProvider, TokenUsage,
    };
    pub use crate::persistence::TranscriptWriter;
    pub use crate::session::{
        CompactionDecision, CompactionPolicy, Compactor, CyclePhase, Memory, SessionController,
        SessionState, Transcript, TurnOutcome, TurnProcessor, COMPACTION_MARKER,
        DEFAULT_OPENING_INSTRUCTION,
    };
}
