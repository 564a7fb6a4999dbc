//! Deferred actions for the reveal delays.
//!
//! Each entry carries the session generation it was scheduled under. The
//! session increments its generation on reset, so anything left over from a
//! previous deal is skipped when it comes due.

use crate::types::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Apply the matched style to a resolved pair.
    RevealMatch(CardId, CardId),
    /// Turn a mismatched pair face down again.
    FlipBack(CardId, CardId),
    /// Tell observers the finished game can be submitted.
    AnnounceCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub due_ms: u64,
    pub generation: u32,
    pub action: DeferredAction,
}

/// Session-local timeline of pending actions.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    queue: Vec<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn schedule(&mut self, delay_ms: u32, generation: u32, action: DeferredAction) {
        self.queue.push(Deferred {
            due_ms: self.now_ms.saturating_add(delay_ms as u64),
            generation,
            action,
        });
    }

    /// Move time forward and take every entry that is now due, earliest first.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<Deferred> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms as u64);

        if !self.queue.iter().any(|d| d.due_ms <= self.now_ms) {
            return Vec::new();
        }

        let now = self.now_ms;
        let mut due = Vec::new();
        self.queue.retain(|d| {
            if d.due_ms <= now {
                due.push(*d);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|d| d.due_ms);
        due
    }

    /// Drop entries that were scheduled under any generation other than `current`.
    pub fn discard_stale(&mut self, current: u32) {
        self.queue.retain(|d| d.generation == current);
    }
}
