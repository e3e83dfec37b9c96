//! End-to-end session cycle tests: turn processing, compaction timing,
//! and degraded behavior under gateway failure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mneme_core::config::SessionConfig;
use mneme_core::error::{MnemeError, Result};
use mneme_core::llm::{LLMProvider, LLMRequest, LLMResponse, MessageRole};
use mneme_core::session::{SessionController, COMPACTION_MARKER};

/// Gateway double with independently scriptable turn and summary behavior.
struct ScriptedGateway {
    turn_calls: AtomicUsize,
    summary_calls: AtomicUsize,
    fail_turns: bool,
    fail_summaries: bool,
}

impl ScriptedGateway {
    fn reliable() -> Self {
        Self {
            turn_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            fail_turns: false,
            fail_summaries: false,
        }
    }

    fn failing_turns() -> Self {
        Self {
            fail_turns: true,
            ..Self::reliable()
        }
    }

    fn failing_summaries() -> Self {
        Self {
            fail_summaries: true,
            ..Self::reliable()
        }
    }

    fn is_summary_request(request: &LLMRequest) -> bool {
        request.messages[0]
            .content
            .contains("Summarize the conversation so far")
    }
}

#[async_trait]
impl LLMProvider for ScriptedGateway {
    async fn generate_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        if Self::is_summary_request(request) {
            let n = self.summary_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_summaries {
                return Err(MnemeError::Gateway("quota exhausted".to_string()));
            }
            Ok(LLMResponse {
                content: format!("condensed history #{}", n),
                usage: None,
            })
        } else {
            let n = self.turn_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_turns {
                return Err(MnemeError::Gateway("connection refused".to_string()));
            }
            Ok(LLMResponse {
                content: format!("assistant reply #{}", n),
                usage: None,
            })
        }
    }
}

fn controller_with(gateway: ScriptedGateway) -> (SessionController, Arc<ScriptedGateway>) {
    let gateway = Arc::new(gateway);
    let controller = SessionController::new(
        &SessionConfig::default(),
        Arc::clone(&gateway) as Arc<dyn LLMProvider>,
    );
    (controller, gateway)
}

/// Scenario A: five turns stay below the threshold.
#[tokio::test]
async fn five_turns_no_compaction() {
    let (mut controller, gateway) = controller_with(ScriptedGateway::reliable());

    for i in 0..5 {
        let outcome = controller.handle_turn(&format!("question {}", i)).await;
        assert!(!outcome.compacted);
        assert_eq!(outcome.reply, format!("assistant reply #{}", i));
    }

    let state = controller.into_state();
    // 1 opening instruction + 10 turn messages
    assert_eq!(state.transcript.len(), 11);
    assert_eq!(state.transcript.conversational_count(), 10);
    assert!(state.memory.is_empty());
    assert_eq!(gateway.summary_calls.load(Ordering::SeqCst), 0);
}

/// Scenario B: the sixth turn brings the count to 12 and compaction fires
/// exactly once.
#[tokio::test]
async fn twelve_messages_trigger_one_compaction() {
    let (mut controller, gateway) = controller_with(ScriptedGateway::reliable());

    for i in 0..5 {
        assert!(!controller.handle_turn(&format!("q{}", i)).await.compacted);
    }
    let outcome = controller.handle_turn("q5").await;
    assert!(outcome.compacted);

    let state = controller.into_state();
    assert_eq!(state.transcript.len(), 7);
    let first = state.transcript.first().unwrap();
    assert_eq!(first.role, MessageRole::System);
    assert_eq!(first.content, COMPACTION_MARKER);
    // Memory holds the raw summarizer output
    assert_eq!(state.memory.as_str(), Some("condensed history #0"));
    assert_eq!(gateway.summary_calls.load(Ordering::SeqCst), 1);
}

/// Compaction never fires before the count first reaches the threshold.
#[tokio::test]
async fn compaction_never_fires_early() {
    let (mut controller, _) = controller_with(ScriptedGateway::reliable());

    for i in 0..5 {
        controller.handle_turn(&format!("q{}", i)).await;
        let count = controller.state().transcript.conversational_count();
        assert_eq!(count, (i + 1) * 2);
        assert!(count < 12);
        assert!(controller.state().memory.is_empty());
    }
}

/// Consecutive compactions only ever extend memory.
#[tokio::test]
async fn memory_grows_monotonically_across_compactions() {
    let (mut controller, gateway) = controller_with(ScriptedGateway::reliable());

    // First compaction
    for i in 0..6 {
        controller.handle_turn(&format!("q{}", i)).await;
    }
    let first_memory = controller.state().memory.as_str().unwrap().to_string();
    let len_before = controller.state().memory.len();

    // Post-compaction window holds 6 conversational messages; three more
    // turns cross the threshold again
    for i in 6..9 {
        controller.handle_turn(&format!("q{}", i)).await;
    }

    assert_eq!(gateway.summary_calls.load(Ordering::SeqCst), 2);
    let state = controller.into_state();
    let memory = state.memory.as_str().unwrap();
    assert!(memory.starts_with(&first_memory));
    assert_eq!(memory, "condensed history #0\ncondensed history #1");
    assert!(state.memory.len() >= len_before + "condensed history #1".len());
}

/// Scenario C: a failing gateway still yields exactly one assistant
/// message per user message, with the failure reason embedded.
#[tokio::test]
async fn turn_failure_degrades_to_apology() {
    let (mut controller, _) = controller_with(ScriptedGateway::failing_turns());

    let outcome = controller.handle_turn("hello?").await;
    assert!(!outcome.compacted);
    assert!(outcome.reply.contains("connection refused"));
    assert!(outcome.reply.starts_with("Sorry, I ran into an error"));

    let state = controller.state();
    assert_eq!(state.transcript.conversational_count(), 2);
    let messages = state.transcript.messages();
    assert_eq!(messages[1].role, MessageRole::User);
    assert_eq!(messages[2].role, MessageRole::Assistant);
    assert!(messages[2].content.contains("connection refused"));
}

/// Scenario C continued: apology turns still count toward compaction, so
/// the policy sequencing is unchanged under total unavailability.
#[tokio::test]
async fn compaction_still_fires_under_failing_turns() {
    let (mut controller, _) = controller_with(ScriptedGateway::failing_turns());

    for _ in 0..5 {
        assert!(!controller.handle_turn("anyone there?").await.compacted);
    }
    let outcome = controller.handle_turn("still there?").await;
    assert!(outcome.compacted);
    assert_eq!(controller.state().transcript.len(), 7);
}

/// Scenario D: summarization failure records a marker in memory and the
/// truncation still happens.
#[tokio::test]
async fn summary_failure_records_marker_and_truncates() {
    let (mut controller, _) = controller_with(ScriptedGateway::failing_summaries());

    for i in 0..6 {
        controller.handle_turn(&format!("q{}", i)).await;
    }

    let state = controller.into_state();
    let memory = state.memory.as_str().unwrap();
    assert!(memory.starts_with("(Summarization failed:"));
    assert!(memory.contains("quota exhausted"));
    assert_eq!(state.transcript.len(), 7);
    assert_eq!(state.transcript.first().unwrap().content, COMPACTION_MARKER);
}
