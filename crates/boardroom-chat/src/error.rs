//! Error types for the conversational surface.

use boardroom_core::error::BoardroomError;

/// Reasons a chat operation was refused.
///
/// Generation failures are not errors here: they become error turns.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a response is already pending")]
    Busy,
    #[error("state error: {0}")]
    State(String),
}

impl From<BoardroomError> for ChatError {
    fn from(err: BoardroomError) -> Self {
        ChatError::State(err.to_string())
    }
}
