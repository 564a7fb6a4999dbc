//! Frontend state machine.
//!
//! [`App`] owns the [`GameSession`] and everything the terminal adds around
//! it: the card cursor, the name prompt, status messages and the cached
//! leaderboard. It never talks to the store directly. Outgoing requests are
//! queued and drained by the caller, and replies are fed back through
//! [`App::handle_reply`], so the whole thing is testable without a runtime.

use crossterm::event::KeyEvent;
use tracing::{info, warn};

use crate::core::{GameSession, PickOutcome, SessionSnapshot};
use crate::input::{handle_key_event, should_quit, EntryEvent, GridCursor, NameEntry, UiCommand};
use crate::store::{Backend, NewScore, ScoreRecord, StoreError, StoreReply, StoreRequest};
use crate::term::{BoardView, FrameBuffer, Hud, ScoreRow, Viewport};
use crate::types::{GRID_COLUMNS, LEADERBOARD_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Playing,
    NameEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSave {
    ticket: u64,
    generation: u32,
}

pub struct App {
    session: GameSession,
    cursor: GridCursor,
    mode: Mode,
    entry: NameEntry,
    /// The prompt was already opened for the current deal.
    prompted: bool,
    saved: bool,
    status: Option<String>,
    scores: Vec<ScoreRow>,
    backend: Option<Backend>,
    pending_save: Option<PendingSave>,
    next_ticket: u64,
    outbox: Vec<StoreRequest>,
    snapshot: SessionSnapshot,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        let cursor = GridCursor::new(GRID_COLUMNS, session.cards().len());
        Self {
            session,
            cursor,
            mode: Mode::Playing,
            entry: NameEntry::new(),
            prompted: false,
            saved: false,
            status: None,
            scores: Vec::new(),
            backend: None,
            pending_save: None,
            next_ticket: 1,
            outbox: Vec::new(),
            snapshot: SessionSnapshot::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn scores(&self) -> &[ScoreRow] {
        &self.scores
    }

    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    pub fn name_buffer(&self) -> &str {
        self.entry.text()
    }

    pub fn save_pending(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Requests queued since the last call.
    pub fn drain_requests(&mut self) -> Vec<StoreRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn refresh_scores(&mut self) {
        self.outbox.push(StoreRequest::ListTop {
            limit: LEADERBOARD_LIMIT,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match self.mode {
            Mode::NameEntry => self.handle_name_key(key),
            Mode::Playing => {
                if should_quit(key) {
                    return Flow::Quit;
                }
                if let Some(command) = handle_key_event(key) {
                    self.apply_command(command);
                }
                Flow::Continue
            }
        }
    }

    pub fn apply_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::Move(dir) => self.cursor.step(dir),
            UiCommand::Flip => {
                if self.session.handle_pick(self.cursor.index()) != PickOutcome::Ignored {
                    self.status = None;
                }
            }
            UiCommand::Start => {
                if self.session.start() {
                    self.status = None;
                }
            }
            UiCommand::Reset => self.reset(),
            UiCommand::RefreshScores => self.refresh_scores(),
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> Flow {
        // Letters are typed into the prompt; only Ctrl-C quits from here.
        if should_quit(key) && key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
            return Flow::Quit;
        }
        match self.entry.handle_key(key) {
            Some(EntryEvent::Submit(name)) => self.submit_name(&name),
            Some(EntryEvent::Cancel) => {
                self.mode = Mode::Playing;
                self.set_status("Score not saved. Press R to play again.");
            }
            Some(EntryEvent::Edited) | None => {}
        }
        Flow::Continue
    }

    /// Queue the finished game for saving under `name`.
    ///
    /// An empty name keeps the prompt open. A game can only be queued once
    /// unless a failed save re-arms it.
    pub fn submit_name(&mut self, name: &str) {
        let Some(result) = self.session.result() else {
            return;
        };
        let score = match NewScore::from_result(name, &result) {
            Ok(score) => score,
            Err(StoreError::EmptyName) => {
                self.set_status("Enter a name to save your score.");
                return;
            }
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };
        if self.session.claim_submission().is_none() {
            self.mode = Mode::Playing;
            self.set_status("This score was already submitted.");
            return;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_save = Some(PendingSave {
            ticket,
            generation: self.session.generation(),
        });
        info!(ticket, player = %score.player_name, score = score.score, "submitting score");
        self.outbox.push(StoreRequest::Save { ticket, score });
        self.mode = Mode::Playing;
        self.set_status("Saving score...");
    }

    pub fn handle_reply(&mut self, reply: StoreReply) {
        match reply {
            StoreReply::Ready { backend, warnings } => {
                self.backend = Some(backend);
                if let Some(last) = warnings.last() {
                    self.set_status(last.clone());
                }
                self.refresh_scores();
            }
            StoreReply::Saved { ticket, result } => {
                let Some(pending) = self.pending_save.filter(|p| p.ticket == ticket) else {
                    warn!(ticket, "reply for an unknown save ticket");
                    return;
                };
                self.pending_save = None;
                let same_deal = pending.generation == self.session.generation();
                match result {
                    Ok(outcome) => {
                        self.backend = Some(outcome.backend);
                        if same_deal {
                            self.saved = true;
                        }
                        self.set_status(if outcome.fell_back {
                            "Remote store unavailable; score saved locally."
                        } else {
                            "Score saved!"
                        });
                        self.refresh_scores();
                    }
                    Err(e) => {
                        warn!(error = %e, "score save failed");
                        if same_deal {
                            self.session.release_submission();
                            self.mode = Mode::NameEntry;
                        }
                        self.set_status(format!("Could not save score: {e}"));
                    }
                }
            }
            StoreReply::Top { backend, result } => match result {
                Ok(records) => {
                    self.backend = Some(backend);
                    self.scores = records.iter().map(score_row).collect();
                }
                Err(e) => {
                    warn!(error = %e, "leaderboard refresh failed");
                    self.set_status(format!("Could not load scores: {e}"));
                }
            },
        }
    }

    /// Advance game time and open the name prompt once completion is announced.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let changed = self.session.advance(elapsed_ms);
        if self.session.completion_announced() && !self.prompted {
            self.prompted = true;
            self.entry.clear();
            self.mode = Mode::NameEntry;
            return true;
        }
        changed
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.cursor.resize(self.session.cards().len());
        self.mode = Mode::Playing;
        self.entry.clear();
        self.prompted = false;
        self.saved = false;
        self.status = None;
    }

    /// Render the current frame into `fb`.
    pub fn render_into(&mut self, view: &BoardView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.session.snapshot_into(&mut self.snapshot);
        let hud = Hud {
            cursor: Some(self.cursor.index()),
            backend: self.backend.map(|b| b.label()),
            scores: &self.scores,
            status: self.status.as_deref(),
            name_entry: (self.mode == Mode::NameEntry).then(|| self.entry.text()),
            saved: self.saved,
        };
        view.render_into(&self.snapshot, &hud, viewport, fb);
    }
}

fn score_row(record: &ScoreRecord) -> ScoreRow {
    ScoreRow {
        player_name: record.player_name.clone(),
        score: record.score,
        duration_seconds: record.game_duration_seconds,
        attempts: record.attempts,
    }
}
