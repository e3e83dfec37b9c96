//! Session Controller

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::llm::LLMProvider;

use super::compactor::Compactor;
use super::policy::{CompactionDecision, CompactionPolicy};
use super::processor::TurnProcessor;
use super::state::SessionState;

/// Phase of the per-turn processing cycle.
///
/// Every user input enters `Process`; `Compact` is entered only when the
/// policy decides the transcript crossed the threshold. Either way the
/// cycle terminates back to awaiting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Process,
    Compact,
}

/// Result of one fully processed user turn
#[derive(Debug)]
pub struct TurnOutcome {
    /// Assistant reply to show the user
    pub reply: String,
    /// Whether compaction ran this cycle
    pub compacted: bool,
}

/// Owns the session's mutable state and drives the two-phase cycle once
/// per user input: process the turn, consult the policy, optionally
/// compact.
///
/// The state is never shared; each phase consumes it and the controller
/// replaces it atomically with the phase's output. `into_state` consumes
/// the controller, so the final state reaches persistence exactly once.
pub struct SessionController {
    id: String,
    state: SessionState,
    processor: TurnProcessor,
    policy: CompactionPolicy,
    compactor: Compactor,
}

impl SessionController {
    /// Create a controller with a freshly constructed session state
    pub fn new(config: &SessionConfig, llm: Arc<dyn LLMProvider>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: SessionState::new(),
            processor: TurnProcessor::new(Arc::clone(&llm), config.system_prompt.clone()),
            policy: CompactionPolicy::new(config.compact_threshold),
            compactor: Compactor::new(llm, config.keep_recent),
        }
    }

    /// The session id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run one full cycle for a user input.
    ///
    /// The cycle always completes: gateway failures degrade to synthetic
    /// content inside the phases, so the state is valid and persistable
    /// after every turn.
    pub async fn handle_turn(&mut self, input: &str) -> TurnOutcome {
        tracing::debug!(session = %self.id, "turn started");

        let mut phase = CyclePhase::Process;
        let mut reply = String::new();
        let mut compacted = false;

        loop {
            match phase {
                CyclePhase::Process => {
                    let state = std::mem::take(&mut self.state);
                    let (next, text) = self.processor.process(state, input).await;
                    self.state = next;
                    reply = text;

                    match self.policy.decide(&self.state.transcript) {
                        CompactionDecision::Compact => phase = CyclePhase::Compact,
                        CompactionDecision::NoOp => break,
                    }
                }
                CyclePhase::Compact => {
                    let state = std::mem::take(&mut self.state);
                    self.state = self.compactor.compact(state).await;
                    compacted = true;
                    break;
                }
            }
        }

        TurnOutcome { reply, compacted }
    }

    /// End the session, yielding the final state for persistence
    pub fn into_state(self) -> SessionState {
        self.state
    }
}
