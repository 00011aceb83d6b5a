//! In-memory backend that replays scripted replies.
//!
//! Records every request it receives. A reply can be held back with
//! [`ScriptedBackend::push_gated`] to keep a call in flight until the test
//! releases it.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};

use crate::backend::TextBackend;
use crate::error::GenerationError;
use crate::request::GenerationRequest;

type Outcome = Result<Option<String>, GenerationError>;

enum Scripted {
    Ready(Outcome),
    Gated(oneshot::Receiver<Outcome>),
}

/// Releases one held reply.
pub struct Gate {
    tx: oneshot::Sender<Outcome>,
}

impl Gate {
    pub fn reply(self, text: impl Into<String>) {
        let _ = self.tx.send(Ok(Some(text.into())));
    }

    pub fn fail(self, err: GenerationError) {
        let _ = self.tx.send(Err(err));
    }
}

pub struct ScriptedBackend {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: watch::Sender<usize>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        let (calls, _) = watch::channel(0);
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls,
        }
    }

    fn push(&self, item: Scripted) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(item);
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.push(Scripted::Ready(Ok(Some(text.into()))));
    }

    /// Queue an answer that carries no text.
    pub fn push_empty(&self) {
        self.push(Scripted::Ready(Ok(None)));
    }

    pub fn push_error(&self, err: GenerationError) {
        self.push(Scripted::Ready(Err(err)));
    }

    /// Queue a reply that is only delivered once the returned gate is used.
    pub fn push_gated(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gated(rx));
        Gate { tx }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }

    pub fn call_count(&self) -> usize {
        *self.calls.borrow()
    }

    /// Wait until at least `n` calls have reached the backend.
    pub async fn wait_for_calls(&self, n: usize) {
        let mut rx = self.calls.subscribe();
        let _ = rx.wait_for(|count| *count >= n).await;
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Outcome {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request.clone());
        let next = self
            .script
            .lock()
            .expect("script mutex poisoned")
            .pop_front();
        self.calls.send_modify(|count| *count += 1);

        match next {
            Some(Scripted::Ready(outcome)) => outcome,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| {
                Err(GenerationError::Request("gate dropped".to_string()))
            }),
            None => Err(GenerationError::Request(
                "no scripted reply left".to_string(),
            )),
        }
    }
}
