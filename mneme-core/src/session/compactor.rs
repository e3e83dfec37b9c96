//! Transcript Compaction

use std::sync::Arc;

use crate::llm::{LLMProvider, LLMRequest, Message};

use super::state::SessionState;
use super::transcript::Transcript;

/// System marker prepended to the transcript after each compaction
pub const COMPACTION_MARKER: &str = "(Context compacted: earlier conversation summarized.)";

/// Fixed instruction for the summarization call
const SUMMARIZER_INSTRUCTION: &str =
    "You are a helpful assistant. Summarize the conversation so far into a short memory \
     that captures goals, key facts, decisions, and unresolved questions. Keep it concise, \
     bullet style, no fluff. If there's an existing summary, update/merge it.";

/// Condenses a threshold-crossing transcript into memory and truncates it
/// to a bounded recent window.
///
/// Runs on the critical path of every Nth turn, so it must never be
/// fatal: a failed summarization call degrades to a marker string naming
/// the failure and compaction proceeds.
pub struct Compactor {
    llm: Arc<dyn LLMProvider>,
    keep_recent: usize,
}

impl Compactor {
    /// Create a compactor retaining `keep_recent` trailing messages
    pub fn new(llm: Arc<dyn LLMProvider>, keep_recent: usize) -> Self {
        Self { llm, keep_recent }
    }

    /// Compact the session: summarize the entire transcript, merge the
    /// summary into memory, and truncate the transcript to a marker plus
    /// the last `keep_recent` messages.
    pub async fn compact(&self, state: SessionState) -> SessionState {
        let SessionState {
            transcript,
            mut memory,
        } = state;

        // The summarizer sees the full transcript, not just the tail: the
        // transcript carries prior markers but no prior memory text.
        let mut context = Vec::with_capacity(transcript.len() + 1);
        context.push(Message::system(SUMMARIZER_INSTRUCTION));
        context.extend(transcript.messages().iter().cloned());

        let request = LLMRequest::from_messages(context).with_temperature(0.3);

        let summary = match self.llm.generate_request(&request).await {
            Ok(response) => response.content.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "summarization failed, recording failure marker");
                format!("(Summarization failed: {})", e)
            }
        };

        memory.absorb(&summary);

        let before = transcript.len();
        let mut retained = Vec::with_capacity(self.keep_recent + 1);
        retained.push(Message::system(COMPACTION_MARKER));
        retained.extend(transcript.tail(self.keep_recent).iter().cloned());
        let transcript = Transcript::from_messages(retained);

        tracing::info!(
            before,
            after = transcript.len(),
            memory_len = memory.len(),
            "transcript compacted"
        );

        SessionState { transcript, memory }
    }
}
