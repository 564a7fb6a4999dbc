//! Observer notifications emitted by [`GameSession`](crate::GameSession).
//!
//! Rendering and persistence layers subscribe to these instead of the session
//! reaching into presentation code.

use crate::session::GameResult;
use crate::types::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started { generation: u32 },
    CardFlipped { card: CardId },
    PairMatched { first: CardId, second: CardId, matched_pairs: u32 },
    /// The matched style may now be applied to the pair.
    MatchRevealed { first: CardId, second: CardId },
    PairMismatched { first: CardId, second: CardId },
    FlippedBack { first: CardId, second: CardId },
    ClockTicked { elapsed_seconds: u32 },
    Completed { result: GameResult },
    /// Emitted a short while after completion; frontends open the submit prompt here.
    CompletionAnnounced { result: GameResult },
    Reset { generation: u32 },
}

pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
