//! Document tools for Boardroom.
//!
//! A fixed catalog of generators (business plan, SWOT, marketing strategy,
//! market research, email) and the orchestrator that runs one generation at a
//! time and holds the current result.

pub mod catalog;
pub mod error;
pub mod orchestrator;

pub use catalog::{catalog, lookup};
pub use error::ToolError;
pub use orchestrator::{ToolOrchestrator, ToolSnapshot};
