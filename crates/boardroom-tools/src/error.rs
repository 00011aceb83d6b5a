//! Error types for the document tools.

use boardroom_core::error::BoardroomError;
use boardroom_llm::GenerationError;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("context cannot be empty")]
    EmptyContext,
    #[error("a document is already being generated")]
    Busy,
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("state error: {0}")]
    State(String),
}

impl From<BoardroomError> for ToolError {
    fn from(err: BoardroomError) -> Self {
        ToolError::State(err.to_string())
    }
}
