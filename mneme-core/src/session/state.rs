//! Session State

use serde::{Deserialize, Serialize};

use crate::llm::Message;

use super::transcript::{Memory, Transcript};

/// Default opening instruction seeded into a fresh transcript
pub const DEFAULT_OPENING_INSTRUCTION: &str =
    "You are a helpful, step-by-step assistant. Explain CS/AI topics clearly. \
     If the user asks for code, provide runnable examples.";

/// The complete mutable state of one conversation session.
///
/// Owned exclusively by the session controller and replaced atomically
/// once per user turn with the turn processor's (and optionally the
/// compactor's) output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Active conversation window
    pub transcript: Transcript,
    /// Condensed summary of compacted history
    pub memory: Memory,
}

impl SessionState {
    /// Create a fresh session: a single system-role instruction message
    /// and empty memory.
    pub fn new() -> Self {
        Self::with_instruction(DEFAULT_OPENING_INSTRUCTION)
    }

    /// Create a fresh session with a custom opening instruction
    pub fn with_instruction(instruction: impl Into<String>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Message::system(instruction));
        Self {
            transcript,
            memory: Memory::new(),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
