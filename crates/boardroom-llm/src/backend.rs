//! The remote generation boundary.

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::request::GenerationRequest;

/// Anything that can take a prompt with optional history and answer with text.
///
/// `Ok(None)` means the backend answered but produced no usable text; the
/// client turns that into its fallback string. Implementations must not retry.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest)
        -> Result<Option<String>, GenerationError>;
}
