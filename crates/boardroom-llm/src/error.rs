//! Error types for the generation client.
//!
//! Every variant carries a stable code (SCREAMING_SNAKE_CASE) that appears in
//! the Display output and is returned by [`GenerationError::code()`].

/// Stable error codes for programmatic handling.
pub mod error_codes {
    /// Invalid or missing configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
    /// Authentication was rejected by the service.
    pub const AUTH_FAILED: &str = "AUTH_FAILED";
    /// The request never produced an HTTP response.
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
    /// The service answered with a non-success status.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
}

/// Failure of a single generation call. Never retried by this crate.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    Config(String),

    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    Auth(String),

    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    Request(String),

    #[error("[{}] HTTP {status}: {message}", error_codes::PROVIDER_ERROR)]
    Provider { status: u16, message: String },
}

impl GenerationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Auth(_) => error_codes::AUTH_FAILED,
            Self::Request(_) => error_codes::REQUEST_FAILED,
            Self::Provider { .. } => error_codes::PROVIDER_ERROR,
        }
    }

    /// The inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m) | Self::Auth(m) | Self::Request(m) => m,
            Self::Provider { message, .. } => message,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Request(format!("request timed out: {err}"))
        } else {
            GenerationError::Request(format!("request failed: {err}"))
        }
    }
}
