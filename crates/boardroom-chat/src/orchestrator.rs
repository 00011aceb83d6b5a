//! Chat orchestrator.
//!
//! Drives the turn lifecycle: validates input, appends the user turn, sends
//! the transcript to the generation client and appends the model reply (or an
//! error turn). Enforces a single in-flight request and publishes a snapshot
//! after every change so a front end can render without polling.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use boardroom_core::prompts::CHAT_ERROR;
use boardroom_core::{ChatState, RequestState, Role, Turn};
use boardroom_llm::GenerationClient;

use crate::error::ChatError;
use crate::transcript::Transcript;

/// Everything a front end needs to render the chat view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSnapshot {
    pub state: ChatState,
    pub turns: Vec<Turn>,
    /// Detail of the most recent generation failure, if any.
    pub last_error: Option<String>,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The model answered; the turn was appended.
    Replied(Turn),
    /// Generation failed; an error turn was appended.
    Errored(Turn),
    /// The transcript was reset while the call was in flight; nothing was
    /// appended.
    Discarded,
}

struct ChatInner {
    transcript: Transcript,
    request: RequestState,
    last_error: Option<String>,
}

impl ChatInner {
    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            state: self.request.into(),
            turns: self.transcript.turns().to_vec(),
            last_error: self.last_error.clone(),
        }
    }
}

pub struct ChatOrchestrator {
    client: GenerationClient,
    inner: Mutex<ChatInner>,
    snapshots: watch::Sender<ChatSnapshot>,
}

impl ChatOrchestrator {
    pub fn new(client: GenerationClient) -> Self {
        let inner = ChatInner {
            transcript: Transcript::new(),
            request: RequestState::Idle,
            last_error: None,
        };
        let (snapshots, _) = watch::channel(inner.snapshot());
        Self {
            client,
            inner: Mutex::new(inner),
            snapshots,
        }
    }

    /// Send a user message and wait for the reply.
    ///
    /// Empty or whitespace-only input, and any input while a reply is pending,
    /// are rejected without touching the transcript. Once accepted, the user
    /// turn is appended verbatim and exactly one model turn follows it, unless
    /// the transcript is reset before the reply arrives.
    pub async fn submit(&self, user_text: &str) -> Result<SubmitOutcome, ChatError> {
        if user_text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let (history, epoch) = {
            let mut inner = self.lock()?;
            if inner.request.is_pending() {
                tracing::debug!("Rejected submit while awaiting response");
                return Err(ChatError::Busy);
            }
            let history = inner.transcript.history();
            inner.request.transition(RequestState::Pending)?;
            inner.transcript.append(Role::User, user_text, false);
            inner.last_error = None;
            self.publish(&inner);
            (history, inner.transcript.epoch())
        };

        let mut in_flight = InFlight::new(self, epoch);
        tracing::debug!(history_len = history.len(), "Sending chat turn");
        let result = self.client.continue_chat(&history, user_text).await;
        in_flight.disarm();

        let mut inner = self.lock()?;
        inner.request.transition(RequestState::Settled)?;

        if inner.transcript.epoch() != epoch {
            tracing::debug!("Transcript was reset during the call, dropping reply");
            self.publish(&inner);
            return Ok(SubmitOutcome::Discarded);
        }

        let outcome = match result {
            Ok(text) => SubmitOutcome::Replied(inner.transcript.append(Role::Model, text, false)),
            Err(e) => {
                tracing::warn!(code = e.code(), "Chat generation failed, appending error turn");
                inner.last_error = Some(e.to_string());
                SubmitOutcome::Errored(inner.transcript.append(Role::Model, CHAT_ERROR, true))
            }
        };
        self.publish(&inner);
        Ok(outcome)
    }

    /// Clear the conversation back to the greeting.
    ///
    /// Allowed at any time. A reply still in flight is dropped when it lands,
    /// and the orchestrator keeps awaiting it until then.
    pub fn reset(&self) -> Result<(), ChatError> {
        let mut inner = self.lock()?;
        inner.transcript.reset();
        inner.last_error = None;
        tracing::info!(
            in_flight = inner.request.is_pending(),
            epoch = inner.transcript.epoch(),
            "Chat transcript reset"
        );
        self.publish(&inner);
        Ok(())
    }

    pub fn state(&self) -> Result<ChatState, ChatError> {
        Ok(self.lock()?.request.into())
    }

    pub fn turns(&self) -> Result<Vec<Turn>, ChatError> {
        Ok(self.lock()?.transcript.turns().to_vec())
    }

    pub fn transcript_len(&self) -> Result<usize, ChatError> {
        Ok(self.lock()?.transcript.len())
    }

    pub fn last_error(&self) -> Result<Option<String>, ChatError> {
        Ok(self.lock()?.last_error.clone())
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receive a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.snapshots.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ChatInner>, ChatError> {
        self.inner
            .lock()
            .map_err(|e| ChatError::State(format!("chat lock poisoned: {}", e)))
    }

    fn publish(&self, inner: &ChatInner) {
        self.snapshots.send_replace(inner.snapshot());
    }
}

/// Settles the request if a submit future is dropped before its reply lands.
/// The abandoned user turn gets an error turn so the transcript keeps its
/// user/model pairing.
struct InFlight<'a> {
    orchestrator: &'a ChatOrchestrator,
    epoch: u64,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(orchestrator: &'a ChatOrchestrator, epoch: u64) -> Self {
        Self {
            orchestrator,
            epoch,
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
        match self.orchestrator.inner.lock() {
            Ok(mut inner) => {
                if inner.request.transition(RequestState::Settled).is_err() {
                    return;
                }
                tracing::warn!("Chat submit abandoned before reply");
                if inner.transcript.epoch() == self.epoch {
                    inner.last_error = Some("request abandoned before reply".to_string());
                    inner.transcript.append(Role::Model, CHAT_ERROR, true);
                }
                self.orchestrator.publish(&inner);
            }
            Err(e) => tracing::error!("Chat lock poisoned while abandoning submit: {}", e),
        }
    }
}
