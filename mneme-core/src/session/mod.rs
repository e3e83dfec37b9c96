//! Conversation Session Management
//!
//! The conversation state machine and compaction policy: a growing
//! transcript of turns, a decision after each turn on whether the
//! transcript must be compacted, and the compaction itself — condensing
//! earlier turns into memory and bounding the active window.
//!
//! # Example
//!
//! ```rust,ignore
//! use mneme_core::config::SessionConfig;
//! use mneme_core::session::SessionController;
//!
//! let mut controller = SessionController::new(&SessionConfig::default(), llm);
//! let outcome = controller.handle_turn("Explain ownership in Rust").await;
//! println!("{}", outcome.reply);
//! let final_state = controller.into_state();
//! ```

mod compactor;
mod controller;
mod policy;
mod processor;
mod state;
mod transcript;

pub use compactor::{Compactor, COMPACTION_MARKER};
pub use controller::{CyclePhase, SessionController, TurnOutcome};
pub use policy::{CompactionDecision, CompactionPolicy};
pub use processor::TurnProcessor;
pub use state::{SessionState, DEFAULT_OPENING_INSTRUCTION};
pub use transcript::{Memory, Transcript};
