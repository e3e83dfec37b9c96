//! Transcript and Memory

use serde::{Deserialize, Serialize};

use crate::llm::Message;

/// The ordered in-memory record of messages for the active conversation
/// window.
///
/// Append-only within a turn; replaced wholesale by compaction. After a
/// compaction the first message is always a system-role marker noting that
/// earlier context was summarized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a transcript from an ordered message sequence
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, in order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Total message count, system markers included
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The first message, when present
    pub fn first(&self) -> Option<&Message> {
        self.messages.first()
    }

    /// Count of conversational messages (user + assistant). System
    /// instructions and markers do not represent turns and are excluded.
    pub fn conversational_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_conversational()).count()
    }

    /// The last `n` messages by position, regardless of role. Returns the
    /// whole transcript when it holds `n` or fewer messages.
    pub fn tail(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }
}

/// Cumulative condensed summary of compacted history.
///
/// Once non-empty, it is only ever extended: new summary text is appended
/// after a newline and prior text is never discarded. The text grows
/// without bound over a long session; that is the contract, not a leak to
/// plug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Memory {
    text: Option<String>,
}

impl Memory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self { text: None }
    }

    /// Check whether any summary has been absorbed yet
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }

    /// The accumulated summary text, when non-empty
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Length of the accumulated text in bytes
    pub fn len(&self) -> usize {
        self.text.as_deref().map_or(0, str::len)
    }

    /// Merge a new summary into the memory.
    ///
    /// Empty memory takes the summary verbatim; otherwise the prior text
    /// is kept as a prefix and the summary is appended after a newline.
    /// Plain concatenation, no deduplication.
    pub fn absorb(&mut self, summary: &str) {
        let merged = match self.as_str() {
            None => summary.to_string(),
            Some(prior) => format!("{}\n{}", prior, summary),
        };
        self.text = Some(merged);
    }
}
