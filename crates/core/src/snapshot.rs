use arrayvec::ArrayVec;

use crate::types::{CardId, Phase, Symbol};

/// How a card should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFace {
    Down,
    Up,
    /// Matched, but still inside the short reveal window.
    MatchSettling,
    Matched,
}

impl CardFace {
    pub fn shows_symbol(&self) -> bool {
        !matches!(self, CardFace::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardSnapshot {
    pub id: CardId,
    pub symbol: Symbol,
    pub face: CardFace,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub cards: Vec<CardSnapshot>,
    pub selected: ArrayVec<CardId, 2>,
    pub phase: Phase,
    pub generation: u32,
    pub moves: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub elapsed_seconds: u32,
    pub score: u32,
    pub started: bool,
    pub completed: bool,
    pub completion_announced: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.selected.clear();
        self.phase = Phase::Idle;
        self.generation = 0;
        self.moves = 0;
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.elapsed_seconds = 0;
        self.score = 0;
        self.started = false;
        self.completed = false;
        self.completion_announced = false;
    }

    /// Matched share of the deck, 0..=100.
    pub fn progress_percent(&self) -> u32 {
        if self.total_pairs == 0 {
            return 0;
        }
        self.matched_pairs * 100 / self.total_pairs
    }

    pub fn playable(&self) -> bool {
        self.started && !self.completed
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            selected: ArrayVec::new(),
            phase: Phase::Idle,
            generation: 0,
            moves: 0,
            matched_pairs: 0,
            total_pairs: 0,
            elapsed_seconds: 0,
            score: 0,
            started: false,
            completed: false,
            completion_announced: false,
        }
    }
}
