//! Stateless adapter between the orchestrators and a text backend.

use std::sync::Arc;

use boardroom_core::prompts::{CHAT_FALLBACK, DOCUMENT_FALLBACK, PERSONA};
use boardroom_core::{HistoryEntry, ToolKind};

use crate::backend::TextBackend;
use crate::error::GenerationError;
use crate::request::{GenerationRequest, SamplingSettings};

/// Issues chat continuations and single-shot document requests.
///
/// Holds no conversation state; every call is built from its arguments, the
/// fixed persona and the sampling settings. Cloning shares the backend.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn TextBackend>,
    sampling: SamplingSettings,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("backend", &self.backend.name())
            .field("sampling", &self.sampling)
            .finish()
    }
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn TextBackend>, sampling: SamplingSettings) -> Self {
        Self { backend, sampling }
    }

    pub fn sampling(&self) -> &SamplingSettings {
        &self.sampling
    }

    /// Continue a conversation.
    ///
    /// `prior_turns` is sent verbatim and in order as context, followed by
    /// `new_user_text` as the newest user turn. A reply without text becomes
    /// the fixed apology; transport and service failures are returned as-is.
    pub async fn continue_chat(
        &self,
        prior_turns: &[HistoryEntry],
        new_user_text: &str,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest {
            system_instruction: PERSONA.to_string(),
            sampling: self.sampling.clone(),
            history: prior_turns.to_vec(),
            prompt: new_user_text.to_string(),
        };
        let reply = self.send(&request).await?;
        Ok(reply.unwrap_or_else(|| {
            tracing::info!("Chat reply had no text, using fallback");
            CHAT_FALLBACK.to_string()
        }))
    }

    /// Generate a standalone document of the given kind from user context.
    ///
    /// The request carries no history. A reply without text becomes the
    /// fixed "unable to generate" string.
    pub async fn generate_document(
        &self,
        tool_kind: ToolKind,
        context_text: &str,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest {
            system_instruction: PERSONA.to_string(),
            sampling: self.sampling.clone(),
            history: Vec::new(),
            prompt: document_prompt(tool_kind, context_text),
        };
        let reply = self.send(&request).await?;
        Ok(reply.unwrap_or_else(|| {
            tracing::info!(tool = %tool_kind, "Document reply had no text, using fallback");
            DOCUMENT_FALLBACK.to_string()
        }))
    }

    async fn send(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError> {
        match self.backend.generate(request).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    code = e.code(),
                    error = %e,
                    "Generation failed"
                );
                Err(e)
            }
        }
    }
}

/// Self-contained prompt for a document generator.
pub fn document_prompt(tool_kind: ToolKind, context_text: &str) -> String {
    format!(
        "Action: Generate content for {}\n\
         Context/Input: {}\n\n\
         Please provide a comprehensive, structured, and professional output based on the above request.\n\
         Use Markdown formatting (headers, lists, bolding) to organize the information effectively.\n\
         Adopt the persona of an expert business consultant.",
        tool_kind.display_name(),
        context_text
    )
}
