//! Compaction Policy

use super::transcript::Transcript;

/// Outcome of a compaction decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionDecision {
    /// Transcript has grown past the threshold and must be compacted
    Compact,
    /// Nothing to do this cycle
    NoOp,
}

/// Decides, after each processed turn, whether the transcript must be
/// compacted.
///
/// Pure and deterministic: counts conversational (user + assistant)
/// messages against a fixed threshold. System markers do not represent
/// turns and are excluded from the count.
#[derive(Debug, Clone, Copy)]
pub struct CompactionPolicy {
    threshold: usize,
}

impl CompactionPolicy {
    /// Create a policy with the given conversational-message threshold
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// The configured threshold
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Decide whether the transcript must be compacted
    pub fn decide(&self, transcript: &Transcript) -> CompactionDecision {
        let count = transcript.conversational_count();
        tracing::debug!(count, threshold = self.threshold, "compaction check");

        if count >= self.threshold {
            CompactionDecision::Compact
        } else {
            CompactionDecision::NoOp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    fn transcript_with_turns(turns: usize) -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(Message::system("seed"));
        for i in 0..turns {
            transcript.push(Message::user(format!("q{}", i)));
            transcript.push(Message::assistant(format!("a{}", i)));
        }
        transcript
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let policy = CompactionPolicy::new(12);
        assert_eq!(
            policy.decide(&transcript_with_turns(5)),
            CompactionDecision::NoOp
        );
    }

    #[test]
    fn test_at_threshold_compacts() {
        let policy = CompactionPolicy::new(12);
        assert_eq!(
            policy.decide(&transcript_with_turns(6)),
            CompactionDecision::Compact
        );
    }

    #[test]
    fn test_system_markers_do_not_count() {
        let policy = CompactionPolicy::new(12);
        let mut transcript = transcript_with_turns(5);
        // Ten conversational messages plus a pile of markers stays a no-op
        for _ in 0..10 {
            transcript.push(Message::system("marker"));
        }
        assert_eq!(policy.decide(&transcript), CompactionDecision::NoOp);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let policy = CompactionPolicy::new(12);
        let transcript = transcript_with_turns(6);
        assert_eq!(policy.decide(&transcript), policy.decide(&transcript));
    }
}
