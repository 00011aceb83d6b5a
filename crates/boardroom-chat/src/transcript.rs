//! Ordered log of conversation turns.
//!
//! Pure data: no I/O, no validation beyond what the types enforce. The chat
//! orchestrator is its only writer.

use chrono::Utc;

use boardroom_core::prompts::GREETING;
use boardroom_core::{HistoryEntry, Role, Turn, TurnId};

/// Turns of one chat session, oldest first.
///
/// Always starts with the model greeting. Turn ids come from a counter that
/// keeps increasing across resets, so ids stay unique for the session.
#[derive(Debug, Clone)]
pub struct Transcript {
    greeting: Turn,
    turns: Vec<Turn>,
    next_id: u64,
    /// Bumped by every reset; identifies the current conversation.
    epoch: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    /// Seed a transcript with a custom greeting.
    pub fn with_greeting(text: impl Into<String>) -> Self {
        let greeting = Turn {
            id: TurnId(1),
            role: Role::Model,
            text: text.into(),
            created_at: Utc::now(),
            is_error: false,
        };
        Self {
            turns: vec![greeting.clone()],
            greeting,
            next_id: 2,
            epoch: 0,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: the greeting is never removed.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn greeting(&self) -> &Turn {
        &self.greeting
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Append a new turn and return a copy of it.
    pub fn append(&mut self, role: Role, text: impl Into<String>, is_error: bool) -> Turn {
        let turn = Turn {
            id: TurnId(self.next_id),
            role,
            text: text.into(),
            created_at: Utc::now(),
            is_error,
        };
        self.next_id += 1;
        self.turns.push(turn.clone());
        turn
    }

    /// Every turn as a `(role, text)` pair, in order.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.turns.iter().map(Turn::to_history).collect()
    }

    /// Truncate back to the greeting and start a new epoch.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(self.greeting.clone());
        self.epoch += 1;
    }
}
