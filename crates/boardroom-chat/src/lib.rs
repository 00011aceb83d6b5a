//! Conversational surface for Boardroom.
//!
//! Owns the chat transcript and the turn lifecycle: one user turn in, one
//! model or error turn out, at most one request in flight.

pub mod error;
pub mod orchestrator;
pub mod transcript;

pub use error::ChatError;
pub use orchestrator::{ChatOrchestrator, ChatSnapshot, SubmitOutcome};
pub use transcript::Transcript;
