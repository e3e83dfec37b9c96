//! Turn Processor

use std::sync::Arc;

use crate::llm::{LLMProvider, LLMRequest, Message};

use super::state::SessionState;

/// Processes one user turn: appends the user message, invokes the
/// inference gateway with the active context, and appends the response.
///
/// Gateway failures are never propagated. They are converted into a
/// synthetic assistant message embedding the failure reason, so the
/// transcript gains exactly one assistant message per user message — the
/// pairing the compaction policy's counting relies on.
pub struct TurnProcessor {
    llm: Arc<dyn LLMProvider>,
    system_prompt: String,
}

impl TurnProcessor {
    /// Create a turn processor with the fixed system instruction used for
    /// every inference call
    pub fn new(llm: Arc<dyn LLMProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
        }
    }

    /// Process a user turn, returning the replacement session state and
    /// the reply text to show the user.
    ///
    /// The active context sent to the gateway is: the fixed system
    /// instruction, a system message embedding the memory (only when
    /// non-empty), then the full transcript including the new user
    /// message.
    pub async fn process(&self, state: SessionState, input: &str) -> (SessionState, String) {
        let SessionState {
            mut transcript,
            memory,
        } = state;

        transcript.push(Message::user(input));

        let mut context = Vec::with_capacity(transcript.len() + 2);
        context.push(Message::system(&self.system_prompt));
        if let Some(summary) = memory.as_str() {
            context.push(Message::system(format!(
                "Conversation summary so far:\n{}",
                summary
            )));
        }
        context.extend(transcript.messages().iter().cloned());

        let request = LLMRequest::from_messages(context);

        let reply = match self.llm.generate_request(&request).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!(error = %e, "turn generation failed, degrading to apology");
                format!("Sorry, I ran into an error while generating a response: {}", e)
            }
        };

        transcript.push(Message::assistant(reply.clone()));

        tracing::debug!(
            messages = transcript.len(),
            memory = !memory.is_empty(),
            "turn processed"
        );

        (SessionState { transcript, memory }, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::llm::{LLMResponse, MessageRole, StubLLMProvider};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the requests it receives and replies with a fixed string.
    struct RecordingProvider {
        requests: Mutex<Vec<Vec<Message>>>,
        reply: String,
    }

    impl RecordingProvider {
        fn new(reply: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for RecordingProvider {
        async fn generate_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
            self.requests.lock().unwrap().push(request.messages.clone());
            Ok(LLMResponse {
                content: self.reply.clone(),
                usage: None,
            })
        }
    }

    #[tokio::test]
    async fn test_appends_user_and_assistant() {
        let provider = Arc::new(RecordingProvider::new("hello back"));
        let processor = TurnProcessor::new(provider, "Be helpful");

        let (state, reply) = processor.process(SessionState::new(), "hello").await;

        assert_eq!(reply, "hello back");
        // seed instruction + user + assistant
        assert_eq!(state.transcript.len(), 3);
        let messages = state.transcript.messages();
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "hello");
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "hello back");
        assert!(state.memory.is_empty());
    }

    #[tokio::test]
    async fn test_context_shape_without_memory() {
        let provider = Arc::new(RecordingProvider::new("ok"));
        let processor = TurnProcessor::new(Arc::clone(&provider) as Arc<dyn LLMProvider>, "Be helpful");

        processor.process(SessionState::new(), "first question").await;

        let requests = provider.requests.lock().unwrap();
        let context = &requests[0];
        // fixed instruction, then the transcript (seed + user); no memory slot
        assert_eq!(context.len(), 3);
        assert_eq!(context[0].content, "Be helpful");
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context[2].content, "first question");
    }

    #[tokio::test]
    async fn test_context_embeds_memory_when_present() {
        let provider = Arc::new(RecordingProvider::new("ok"));
        let processor = TurnProcessor::new(Arc::clone(&provider) as Arc<dyn LLMProvider>, "Be helpful");

        let mut state = SessionState::new();
        state.memory.absorb("- user is learning Rust");

        processor.process(state, "next question").await;

        let requests = provider.requests.lock().unwrap();
        let context = &requests[0];
        assert_eq!(context[1].role, MessageRole::System);
        assert!(context[1].content.contains("Conversation summary so far:"));
        assert!(context[1].content.contains("- user is learning Rust"));
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_apology() {
        let processor = TurnProcessor::new(Arc::new(StubLLMProvider), "Be helpful");

        let (state, reply) = processor.process(SessionState::new(), "hello").await;

        assert!(reply.starts_with("Sorry, I ran into an error"));
        assert!(reply.contains("LLM provider not configured"));
        // Still exactly one user and one assistant message gained
        assert_eq!(state.transcript.len(), 3);
        assert_eq!(state.transcript.conversational_count(), 2);
    }
}
