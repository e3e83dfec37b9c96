//! Transcript Persistence
//!
//! Sink for the final session state: a human-readable conversation log
//! plus line-delimited structured records for analysis/replay.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::PersistenceConfig;
use crate::error::Result;
use crate::llm::MessageRole;
use crate::session::SessionState;

/// Structured record for one transcript line
#[derive(Serialize)]
struct TranscriptRecord<'a> {
    ts: &'a str,
    role: &'a str,
    content: &'a str,
}

/// Writes the final `(Transcript, Memory)` of a session to disk.
///
/// Invoked exactly once per session, on every termination path.
pub struct TranscriptWriter {
    text_path: PathBuf,
    jsonl_path: PathBuf,
}

impl TranscriptWriter {
    /// Create a writer from persistence configuration
    pub fn new(config: &PersistenceConfig) -> Self {
        Self {
            text_path: config.text_path.clone(),
            jsonl_path: config.jsonl_path.clone(),
        }
    }

    /// Write both output files
    pub fn write(&self, state: &SessionState) -> Result<()> {
        self.write_text(state)?;
        self.write_jsonl(state)?;
        tracing::info!(
            text = %self.text_path.display(),
            jsonl = %self.jsonl_path.display(),
            "conversation saved"
        );
        Ok(())
    }

    fn write_text(&self, state: &SessionState) -> Result<()> {
        let mut file = std::fs::File::create(&self.text_path)?;

        writeln!(file, "Your Conversation Log:")?;
        if let Some(memory) = state.memory.as_str() {
            writeln!(file, "\n[Summary]")?;
            writeln!(file, "{}\n", memory)?;
        }

        for message in state.transcript.messages() {
            match message.role {
                MessageRole::User => writeln!(file, "You: {}", message.content)?,
                MessageRole::Assistant => writeln!(file, "AI: {}\n", message.content)?,
                MessageRole::System => writeln!(file, "[System]: {}", message.content)?,
            }
        }
        writeln!(file, "End of Conversation")?;

        Ok(())
    }

    fn write_jsonl(&self, state: &SessionState) -> Result<()> {
        let ts = chrono::Utc::now().to_rfc3339();
        let mut file = std::fs::File::create(&self.jsonl_path)?;

        for message in state.transcript.messages() {
            let record = TranscriptRecord {
                ts: &ts,
                role: message.role.as_str(),
                content: &message.content,
            };
            writeln!(file, "{}", serde_json::to_string(&record)?)?;
        }

        if let Some(memory) = state.memory.as_str() {
            let content = format!("[SUMMARY]\n{}", memory);
            let record = TranscriptRecord {
                ts: &ts,
                role: "system",
                content: &content,
            };
            writeln!(file, "{}", serde_json::to_string(&record)?)?;
        }

        Ok(())
    }
}
