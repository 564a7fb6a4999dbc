//! Game session module - the complete state of one table
//!
//! This module ties together the deck, the two-card selection, the session
//! clock, scoring and the reveal delays. It handles the pick state machine and
//! the game lifecycle (start, complete, reset).
//!
//! ```text
//! Idle --start--> AwaitingFirstPick --pick--> AwaitingSecondPick --pick-->
//!     match:    AwaitingFirstPick | Completed
//!     mismatch: Resolving --(reveal delay)--> AwaitingFirstPick
//! ```

use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::clock::SessionClock;
use crate::deck::{build_deck, Card};
use crate::events::{SessionEvent, SessionObserver};
use crate::rng::DeckRng;
use crate::schedule::{DeferredAction, Scheduler};
use crate::scoring::calculate_score;
use crate::snapshot::{CardFace, CardSnapshot, SessionSnapshot};
use crate::types::*;

/// Invalid session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a deck needs at least one symbol")]
    NoSymbols,
    #[error("symbol {0:?} is listed more than once")]
    DuplicateSymbol(Symbol),
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Deck contents and display-affordance delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub symbols: Vec<Symbol>,
    pub match_reveal_ms: u32,
    pub mismatch_reveal_ms: u32,
    pub completion_notice_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbols: Symbol::ALL.to_vec(),
            match_reveal_ms: MATCH_REVEAL_MS,
            mismatch_reveal_ms: MISMATCH_REVEAL_MS,
            completion_notice_ms: COMPLETION_NOTICE_MS,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables.
    ///
    /// - `MEMORY_MATCH_PAIRS`: number of symbols to deal (1..=8, default 8)
    /// - `MEMORY_MATCH_MATCH_REVEAL_MS`, `MEMORY_MATCH_MISMATCH_REVEAL_MS`,
    ///   `MEMORY_MATCH_COMPLETION_NOTICE_MS`: delay overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let mut config = Self::default();

        if let Ok(raw) = env::var("MEMORY_MATCH_PAIRS") {
            let pairs: usize = raw
                .trim()
                .parse()
                .ok()
                .filter(|n| (1..=PAIR_COUNT).contains(n))
                .ok_or(ConfigError::InvalidValue {
                    name: "MEMORY_MATCH_PAIRS",
                    value: raw.clone(),
                })?;
            config.symbols.truncate(pairs);
        }

        let delay = |name: &'static str, default: u32| -> Result<u32, ConfigError> {
            match env::var(name) {
                Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name,
                    value: raw.clone(),
                }),
                Err(_) => Ok(default),
            }
        };
        config.match_reveal_ms = delay("MEMORY_MATCH_MATCH_REVEAL_MS", config.match_reveal_ms)?;
        config.mismatch_reveal_ms =
            delay("MEMORY_MATCH_MISMATCH_REVEAL_MS", config.mismatch_reveal_ms)?;
        config.completion_notice_ms =
            delay("MEMORY_MATCH_COMPLETION_NOTICE_MS", config.completion_notice_ms)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        for (i, symbol) in self.symbols.iter().enumerate() {
            if self.symbols[..i].contains(symbol) {
                return Err(ConfigError::DuplicateSymbol(*symbol));
            }
        }
        Ok(())
    }

    pub fn pair_count(&self) -> u32 {
        self.symbols.len() as u32
    }
}

/// Result of a single pick.
///
/// Rejected picks are not errors; they simply report `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Ignored,
    Flipped,
    Matched { completed: bool },
    Mismatched,
}

/// Summary of a completed game, ready to be turned into a score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameResult {
    pub score: u32,
    pub duration_seconds: u32,
    pub attempts: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
}

/// Complete session state
pub struct GameSession {
    config: SessionConfig,
    rng: DeckRng,
    cards: Vec<Card>,
    /// Per-card: matched style applied (reveal delay elapsed).
    match_shown: Vec<bool>,
    selected: ArrayVec<CardId, 2>,
    moves: u32,
    matched_pairs: u32,
    final_score: Option<u32>,
    clock: SessionClock,
    scheduler: Scheduler,
    /// Monotonic deal id (increments on reset). Deferred actions are tagged with it.
    generation: u32,
    started: bool,
    completed: bool,
    completion_announced: bool,
    submission_claimed: bool,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("generation", &self.generation)
            .field("phase", &self.phase())
            .field("moves", &self.moves)
            .field("matched_pairs", &self.matched_pairs)
            .field("elapsed_seconds", &self.elapsed_seconds())
            .field("selected", &self.selected)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GameSession {
    /// Create a classic eight-pair session with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::build(SessionConfig::default(), DeckRng::new(seed))
    }

    pub fn with_config(config: SessionConfig, rng: DeckRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: SessionConfig, mut rng: DeckRng) -> Self {
        let cards = build_deck(&config.symbols, &mut rng);
        let match_shown = vec![false; cards.len()];
        Self {
            config,
            rng,
            cards,
            match_shown,
            selected: ArrayVec::new(),
            moves: 0,
            matched_pairs: 0,
            final_score: None,
            clock: SessionClock::new(),
            scheduler: Scheduler::new(),
            generation: 0,
            started: false,
            completed: false,
            completion_announced: false,
            submission_claimed: false,
            observers: Vec::new(),
        }
    }

    /// Register an observer for state-change notifications.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(&event);
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.config.pair_count()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed_seconds()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn completion_announced(&self) -> bool {
        self.completion_announced
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn pending_deferred(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            return Phase::Completed;
        }
        if !self.started {
            return Phase::Idle;
        }
        match self.selected.len() {
            0 => Phase::AwaitingFirstPick,
            1 => Phase::AwaitingSecondPick,
            _ => Phase::Resolving,
        }
    }

    /// Live score. Frozen at the completion value once the game is finished.
    pub fn score(&self) -> u32 {
        self.final_score.unwrap_or_else(|| {
            calculate_score(self.moves, self.elapsed_seconds(), self.matched_pairs).total
        })
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn progress_percent(&self) -> u32 {
        let total = self.total_pairs();
        if total == 0 {
            0
        } else {
            self.matched_pairs * 100 / total
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        let score = self.final_score?;
        Some(GameResult {
            score,
            duration_seconds: self.elapsed_seconds(),
            attempts: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs(),
        })
    }

    /// Hand out the completed result for submission, at most once per game.
    pub fn claim_submission(&mut self) -> Option<GameResult> {
        if self.submission_claimed {
            return None;
        }
        let result = self.result()?;
        self.submission_claimed = true;
        Some(result)
    }

    /// Re-arm submission after a failed save so the player can retry.
    pub fn release_submission(&mut self) {
        if self.completed {
            self.submission_claimed = false;
        }
    }

    pub fn submission_claimed(&self) -> bool {
        self.submission_claimed
    }

    /// Start the clock and accept picks. No-op if already started or finished.
    pub fn start(&mut self) -> bool {
        if self.started || self.completed {
            return false;
        }
        self.started = true;
        self.clock.start();
        debug!(generation = self.generation, "session started");
        self.emit(SessionEvent::Started {
            generation: self.generation,
        });
        true
    }

    /// Deal a fresh deck and return to `Idle`.
    ///
    /// Pending reveal delays from the previous deal are invalidated.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.generation = self.generation.wrapping_add(1);
        self.scheduler.discard_stale(self.generation);

        self.cards = build_deck(&self.config.symbols, &mut self.rng);
        self.match_shown = vec![false; self.cards.len()];
        self.selected.clear();
        self.moves = 0;
        self.matched_pairs = 0;
        self.final_score = None;
        self.started = false;
        self.completed = false;
        self.completion_announced = false;
        self.submission_claimed = false;

        debug!(generation = self.generation, "session reset");
        self.emit(SessionEvent::Reset {
            generation: self.generation,
        });
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Reset => {
                self.reset();
                true
            }
            GameAction::Pick(id) => self.handle_pick(id) != PickOutcome::Ignored,
        }
    }

    fn accepts_pick(&self, id: CardId) -> bool {
        if !self.phase().accepts_picks() {
            return false;
        }
        match self.cards.get(id) {
            Some(card) => !card.is_flipped() && !card.is_matched(),
            None => false,
        }
    }

    /// Flip a card. Out-of-turn or repeated picks are ignored.
    pub fn handle_pick(&mut self, id: CardId) -> PickOutcome {
        if !self.accepts_pick(id) {
            debug!(card = id, phase = self.phase().as_str(), "pick ignored");
            return PickOutcome::Ignored;
        }

        self.cards[id].set_flipped(true);
        self.selected.push(id);
        self.emit(SessionEvent::CardFlipped { card: id });

        if self.selected.len() < 2 {
            return PickOutcome::Flipped;
        }

        self.moves += 1;
        self.resolve()
    }

    fn resolve(&mut self) -> PickOutcome {
        let (first, second) = (self.selected[0], self.selected[1]);

        if self.cards[first].symbol() != self.cards[second].symbol() {
            debug!(first, second, moves = self.moves, "mismatch");
            self.scheduler.schedule(
                self.config.mismatch_reveal_ms,
                self.generation,
                DeferredAction::FlipBack(first, second),
            );
            self.emit(SessionEvent::PairMismatched { first, second });
            return PickOutcome::Mismatched;
        }

        self.cards[first].set_matched();
        self.cards[second].set_matched();
        self.matched_pairs += 1;
        self.selected.clear();
        self.scheduler.schedule(
            self.config.match_reveal_ms,
            self.generation,
            DeferredAction::RevealMatch(first, second),
        );
        debug!(
            first,
            second,
            symbol = self.cards[first].symbol().as_str(),
            matched_pairs = self.matched_pairs,
            "match"
        );
        self.emit(SessionEvent::PairMatched {
            first,
            second,
            matched_pairs: self.matched_pairs,
        });

        let completed = self.matched_pairs == self.total_pairs();
        if completed {
            self.complete();
        }
        PickOutcome::Matched { completed }
    }

    fn complete(&mut self) {
        self.completed = true;
        self.clock.stop();
        let score = calculate_score(self.moves, self.elapsed_seconds(), self.matched_pairs).total;
        self.final_score = Some(score);
        self.scheduler.schedule(
            self.config.completion_notice_ms,
            self.generation,
            DeferredAction::AnnounceCompletion,
        );

        if let Some(result) = self.result() {
            info!(
                score = result.score,
                seconds = result.duration_seconds,
                attempts = result.attempts,
                "game completed"
            );
            self.emit(SessionEvent::Completed { result });
        }
    }

    /// Advance session time by `elapsed_ms`.
    ///
    /// Drives the elapsed-seconds counter and runs any deferred action that
    /// has come due. Returns whether anything observable changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;

        if self.clock.advance(elapsed_ms) > 0 {
            changed = true;
            self.emit(SessionEvent::ClockTicked {
                elapsed_seconds: self.elapsed_seconds(),
            });
        }

        for deferred in self.scheduler.advance(elapsed_ms) {
            if deferred.generation != self.generation {
                continue;
            }
            changed |= self.run_deferred(deferred.action);
        }

        changed
    }

    fn run_deferred(&mut self, action: DeferredAction) -> bool {
        match action {
            DeferredAction::RevealMatch(first, second) => {
                for id in [first, second] {
                    if let Some(shown) = self.match_shown.get_mut(id) {
                        *shown = true;
                    }
                }
                self.emit(SessionEvent::MatchRevealed { first, second });
                true
            }
            DeferredAction::FlipBack(first, second) => {
                // Only the pair that is still awaiting resolution gets turned back.
                if !self.started || self.completed || self.selected.as_slice() != [first, second] {
                    return false;
                }
                for id in [first, second] {
                    if !self.cards[id].is_matched() {
                        self.cards[id].set_flipped(false);
                    }
                }
                self.selected.clear();
                self.emit(SessionEvent::FlippedBack { first, second });
                true
            }
            DeferredAction::AnnounceCompletion => {
                if !self.completed || self.completion_announced {
                    return false;
                }
                self.completion_announced = true;
                if let Some(result) = self.result() {
                    self.emit(SessionEvent::CompletionAnnounced { result });
                }
                true
            }
        }
    }

    fn face_of(&self, card: &Card) -> CardFace {
        if card.is_matched() {
            if self.match_shown[card.id()] {
                CardFace::Matched
            } else {
                CardFace::MatchSettling
            }
        } else if card.is_flipped() {
            CardFace::Up
        } else {
            CardFace::Down
        }
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.cards.clear();
        out.cards.extend(self.cards.iter().map(|card| CardSnapshot {
            id: card.id(),
            symbol: card.symbol(),
            face: self.face_of(card),
        }));
        out.selected = self.selected.clone();
        out.phase = self.phase();
        out.generation = self.generation;
        out.moves = self.moves;
        out.matched_pairs = self.matched_pairs;
        out.total_pairs = self.total_pairs();
        out.elapsed_seconds = self.elapsed_seconds();
        out.score = self.score();
        out.started = self.started;
        out.completed = self.completed;
        out.completion_announced = self.completion_announced;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
