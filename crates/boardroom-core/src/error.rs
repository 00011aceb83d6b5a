use thiserror::Error;

/// Top-level error type for Boardroom.
///
/// Subsystem crates define their own error types; this one covers the
/// shared concerns (configuration, filesystem, serialization) and the
/// invalid state transitions rejected by [`crate::state::RequestState`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BoardroomError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid request state transition: {from} -> {to}")]
    InvalidTransition {
        from: crate::state::RequestState,
        to: crate::state::RequestState,
    },
}

impl From<toml::de::Error> for BoardroomError {
    fn from(err: toml::de::Error) -> Self {
        BoardroomError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BoardroomError {
    fn from(err: toml::ser::Error) -> Self {
        BoardroomError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for BoardroomError {
    fn from(err: serde_json::Error) -> Self {
        BoardroomError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Boardroom operations.
pub type Result<T> = std::result::Result<T, BoardroomError>;
