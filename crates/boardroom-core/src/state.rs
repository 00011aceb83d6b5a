//! Request lifecycle states with validated transitions.
//!
//! Each orchestrator owns one [`RequestState`]:
//! - Idle -> Pending (first call accepted)
//! - Pending -> Settled (call finished, success or failure)
//! - Settled -> Pending (next call accepted)
//!
//! `Pending` means exactly one remote call is outstanding. The per-surface
//! views [`ChatState`] and [`ToolState`] are derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoardroomError, Result};

/// In-flight flag scoped to one orchestrator instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// No call has been made yet.
    #[default]
    Idle,
    /// One call is outstanding.
    Pending,
    /// The last call has finished.
    Settled,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Idle => write!(f, "idle"),
            RequestState::Pending => write!(f, "pending"),
            RequestState::Settled => write!(f, "settled"),
        }
    }
}

impl RequestState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: RequestState) -> bool {
        matches!(
            (self, target),
            (RequestState::Idle, RequestState::Pending)
                | (RequestState::Pending, RequestState::Settled)
                | (RequestState::Settled, RequestState::Pending)
        )
    }

    /// Apply a transition, rejecting the ones not listed above.
    pub fn transition(&mut self, target: RequestState) -> Result<()> {
        if self.can_transition_to(target) {
            tracing::trace!("Request state: {} -> {}", self, target);
            *self = target;
            Ok(())
        } else {
            Err(BoardroomError::InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

/// State of the conversational surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

impl From<RequestState> for ChatState {
    fn from(state: RequestState) -> Self {
        if state.is_pending() {
            ChatState::AwaitingResponse
        } else {
            ChatState::Idle
        }
    }
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatState::Idle => write!(f, "idle"),
            ChatState::AwaitingResponse => write!(f, "awaiting-response"),
        }
    }
}

/// State of the document generator surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolState {
    Idle,
    Generating,
}

impl From<RequestState> for ToolState {
    fn from(state: RequestState) -> Self {
        if state.is_pending() {
            ToolState::Generating
        } else {
            ToolState::Idle
        }
    }
}

impl fmt::Display for ToolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolState::Idle => write!(f, "idle"),
            ToolState::Generating => write!(f, "generating"),
        }
    }
}
