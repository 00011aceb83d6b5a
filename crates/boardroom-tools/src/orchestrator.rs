//! Tool orchestrator.
//!
//! Runs one document generation at a time for the selected tool and keeps the
//! latest result. A failure leaves no result behind and raises a one-time
//! notice for the front end to show.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use boardroom_core::prompts::TOOL_FAILURE_NOTICE;
use boardroom_core::{RequestState, ToolKind, ToolResult, ToolState};
use boardroom_llm::GenerationClient;

use crate::error::ToolError;

/// Everything a front end needs to render the tools view.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSnapshot {
    pub state: ToolState,
    pub selected: ToolKind,
    /// Draft context staged by the front end.
    pub context: String,
    pub current: Option<ToolResult>,
    /// Pending failure notice, shown once.
    pub notice: Option<String>,
}

struct ToolInner {
    selected: ToolKind,
    context: String,
    current: Option<ToolResult>,
    request: RequestState,
    notice: Option<String>,
}

impl ToolInner {
    fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            state: self.request.into(),
            selected: self.selected,
            context: self.context.clone(),
            current: self.current.clone(),
            notice: self.notice.clone(),
        }
    }
}

pub struct ToolOrchestrator {
    client: GenerationClient,
    inner: Mutex<ToolInner>,
    snapshots: watch::Sender<ToolSnapshot>,
}

impl ToolOrchestrator {
    pub fn new(client: GenerationClient) -> Self {
        let inner = ToolInner {
            selected: ToolKind::default(),
            context: String::new(),
            current: None,
            request: RequestState::Idle,
            notice: None,
        };
        let (snapshots, _) = watch::channel(inner.snapshot());
        Self {
            client,
            inner: Mutex::new(inner),
            snapshots,
        }
    }

    /// Switch generator. Drops the current result and the staged context.
    pub fn select_tool(&self, kind: ToolKind) -> Result<(), ToolError> {
        let mut inner = self.lock()?;
        if inner.request.is_pending() {
            return Err(ToolError::Busy);
        }
        inner.selected = kind;
        inner.current = None;
        inner.context.clear();
        tracing::debug!(tool = %kind, "Tool selected");
        self.publish(&inner);
        Ok(())
    }

    /// Stage draft context without generating.
    pub fn set_context(&self, context_text: impl Into<String>) -> Result<(), ToolError> {
        let mut inner = self.lock()?;
        inner.context = context_text.into();
        self.publish(&inner);
        Ok(())
    }

    /// Generate a document for the selected tool from `context_text`.
    ///
    /// Rejected when the context is blank or a generation is already running.
    /// The previous result is cleared as soon as the request is accepted.
    pub async fn generate(&self, context_text: &str) -> Result<ToolResult, ToolError> {
        if context_text.trim().is_empty() {
            return Err(ToolError::EmptyContext);
        }

        let kind = {
            let mut inner = self.lock()?;
            if inner.request.is_pending() {
                tracing::debug!("Rejected generate while generating");
                return Err(ToolError::Busy);
            }
            inner.request.transition(RequestState::Pending)?;
            inner.current = None;
            inner.notice = None;
            inner.context = context_text.to_string();
            self.publish(&inner);
            inner.selected
        };

        let mut in_flight = InFlight::new(self);
        tracing::info!(tool = %kind, context_len = context_text.len(), "Generating document");
        let result = self.client.generate_document(kind, context_text).await;
        in_flight.disarm();

        let mut inner = self.lock()?;
        inner.request.transition(RequestState::Settled)?;
        match result {
            Ok(content) => {
                let doc = ToolResult::new(kind, content);
                tracing::info!(tool = %kind, id = %doc.id, "Document generated");
                inner.current = Some(doc.clone());
                self.publish(&inner);
                Ok(doc)
            }
            Err(e) => {
                tracing::warn!(tool = %kind, code = e.code(), "Document generation failed");
                inner.notice = Some(TOOL_FAILURE_NOTICE.to_string());
                self.publish(&inner);
                Err(ToolError::Generation(e))
            }
        }
    }

    /// Consume the failure notice, if one is pending.
    pub fn take_notice(&self) -> Result<Option<String>, ToolError> {
        let mut inner = self.lock()?;
        let notice = inner.notice.take();
        if notice.is_some() {
            self.publish(&inner);
        }
        Ok(notice)
    }

    pub fn state(&self) -> Result<ToolState, ToolError> {
        Ok(self.lock()?.request.into())
    }

    pub fn selected(&self) -> Result<ToolKind, ToolError> {
        Ok(self.lock()?.selected)
    }

    pub fn current(&self) -> Result<Option<ToolResult>, ToolError> {
        Ok(self.lock()?.current.clone())
    }

    pub fn snapshot(&self) -> ToolSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ToolSnapshot> {
        self.snapshots.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ToolInner>, ToolError> {
        self.inner
            .lock()
            .map_err(|e| ToolError::State(format!("tool lock poisoned: {}", e)))
    }

    fn publish(&self, inner: &ToolInner) {
        self.snapshots.send_replace(inner.snapshot());
    }
}

/// Settles the request when a generate future is dropped mid-call.
struct InFlight<'a> {
    orchestrator: &'a ToolOrchestrator,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(orchestrator: &'a ToolOrchestrator) -> Self {
        Self {
            orchestrator,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut inner) = self.orchestrator.inner.lock() {
            if inner.request.transition(RequestState::Settled).is_ok() {
                tracing::warn!("Document generation abandoned");
                self.orchestrator.publish(&inner);
            }
        }
    }
}
