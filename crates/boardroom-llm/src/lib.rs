//! Generation client for Boardroom.
//!
//! Turns chat continuations and document requests into calls against a
//! remote text-generation backend, and maps empty replies to the fixed
//! fallback texts.

pub mod backend;
pub mod client;
pub mod error;
pub mod gemini;
pub mod request;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::TextBackend;
pub use client::GenerationClient;
pub use error::GenerationError;
pub use gemini::{GeminiBackend, GeminiConfig};
pub use request::{GenerationRequest, SamplingSettings};
