//! BoardView: maps a `SessionSnapshot` plus UI state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{format_clock, format_duration, CardFace, CardSnapshot, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CardId, Symbol, GRID_COLUMNS};

const BG: Rgb = Rgb::new(0, 0, 0);
const TABLE_BG: Rgb = Rgb::new(22, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// One leaderboard line as the panel shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub player_name: String,
    pub score: u32,
    pub duration_seconds: u32,
    pub attempts: u32,
}

impl ScoreRow {
    /// `name  score (M:SS, attempts)`
    pub fn label(&self) -> String {
        format!(
            "{}  {} ({}, {})",
            self.player_name,
            self.score,
            format_duration(self.duration_seconds),
            self.attempts
        )
    }
}

/// Everything the frontend adds on top of the session snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    pub cursor: Option<CardId>,
    /// "REMOTE" / "LOCAL"; `None` while the store is still connecting.
    pub backend: Option<&'a str>,
    pub scores: &'a [ScoreRow],
    pub status: Option<&'a str>,
    /// Current name buffer while the name prompt is open.
    pub name_entry: Option<&'a str>,
    pub saved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the card table.
pub struct BoardView {
    /// Card width in terminal columns, including the border.
    card_w: u16,
    /// Card height in terminal rows, including the border.
    card_h: u16,
    gap: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            card_w: 7,
            card_h: 3,
            gap: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl BoardView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self {
            card_w: card_w.max(3),
            card_h: card_h.max(3),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered table for a deck of `cards` cards.
    pub fn table_size(&self, cards: usize) -> (u16, u16) {
        let cols = GRID_COLUMNS as u16;
        let rows = cards.div_ceil(GRID_COLUMNS).max(1) as u16;
        let w = cols * self.card_w + (cols - 1) * self.gap + 4;
        let h = rows * self.card_h + (rows - 1) * self.gap + 2;
        (w, h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.table_size(snap.cards.len());
        let panel_w = 34;
        let total_w = frame_w + 2 + panel_w;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h + 2) / 2,
            AnchorY::Top => 0,
        };

        let table = CellStyle::fg(Rgb::new(80, 90, 100)).on(TABLE_BG);
        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', table);
        fb.draw_box(start_x, start_y, frame_w, frame_h, CellStyle::fg(Rgb::new(200, 200, 200)));

        for card in &snap.cards {
            let focused = hud.cursor == Some(card.id);
            let selected = snap.selected.contains(&card.id);
            self.draw_card(fb, start_x, start_y, card, focused, selected);
        }

        self.draw_side_panel(fb, snap, hud, viewport, start_x + frame_w + 2, start_y);

        if !snap.started {
            self.draw_banner(fb, start_x, start_y, frame_w, frame_h, "PRESS S TO START");
        } else if let Some(name) = hud.name_entry {
            self.draw_name_prompt(fb, snap, name, start_x, start_y, frame_w, frame_h);
        } else if snap.completion_announced {
            let text = if hud.saved {
                "SCORE SAVED - R TO PLAY AGAIN"
            } else {
                "ALL PAIRS FOUND - R TO PLAY AGAIN"
            };
            self.draw_banner(fb, start_x, start_y, frame_w, frame_h, text);
        }

        // Status line.
        if let Some(status) = hud.status {
            if viewport.height > 0 {
                let y = viewport.height - 1;
                let style = CellStyle::fg(Rgb::new(250, 200, 90));
                fb.put_str_clipped(0, y, status, viewport.width, style);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Top-left corner of a card, in framebuffer coordinates.
    pub fn card_origin(&self, start_x: u16, start_y: u16, id: CardId) -> (u16, u16) {
        let col = (id % GRID_COLUMNS) as u16;
        let row = (id / GRID_COLUMNS) as u16;
        (
            start_x + 2 + col * (self.card_w + self.gap),
            start_y + 1 + row * (self.card_h + self.gap),
        )
    }

    fn draw_card(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        card: &CardSnapshot,
        focused: bool,
        selected: bool,
    ) {
        let (x, y) = self.card_origin(start_x, start_y, card.id);
        let (border_fg, fill_bg) = match card.face {
            CardFace::Down => (Rgb::new(110, 120, 140), Rgb::new(45, 55, 75)),
            CardFace::Up => (Rgb::new(230, 230, 230), Rgb::new(60, 60, 70)),
            CardFace::MatchSettling => (Rgb::new(250, 220, 90), Rgb::new(70, 65, 30)),
            CardFace::Matched => (Rgb::new(90, 190, 110), Rgb::new(25, 50, 30)),
        };
        let mut border = CellStyle::fg(border_fg).on(TABLE_BG);
        if focused {
            border = CellStyle::fg(Rgb::new(80, 220, 255)).on(TABLE_BG).bold();
        } else if selected {
            border = border.bold();
        }

        let inner = CellStyle::fg(Rgb::new(90, 100, 120)).on(fill_bg);
        fb.fill_rect(x + 1, y + 1, self.card_w - 2, self.card_h - 2, ' ', inner);
        fb.draw_box(x, y, self.card_w, self.card_h, border);

        let mid_x = x + self.card_w / 2;
        let mid_y = y + self.card_h / 2;
        if card.face.shows_symbol() {
            let mut style = CellStyle::fg(symbol_color(card.symbol)).on(fill_bg).bold();
            if card.face == CardFace::Matched {
                style.bold = false;
            }
            fb.put_char(mid_x, mid_y, card.symbol.letter(), style);
        } else {
            fb.put_char(mid_x, mid_y, '?', inner);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x + 7, y, snap.score, value);
        y += 1;
        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x + 7, y, snap.moves, value);
        y += 1;
        fb.put_str(panel_x, y, "TIME", label);
        fb.put_str(panel_x + 7, y, &format_clock(snap.elapsed_seconds), value);
        y += 2;

        // Progress bar.
        let pct = snap.progress_percent();
        let bar_w = panel_w.saturating_sub(8).min(16);
        let filled = (bar_w as u32 * pct / 100) as u16;
        let bar = CellStyle::fg(Rgb::new(90, 190, 110));
        fb.put_char(panel_x, y, '[', value);
        fb.fill_rect(panel_x + 1, y, filled, 1, '█', bar);
        fb.fill_rect(panel_x + 1 + filled, y, bar_w - filled, 1, '·', dim);
        fb.put_char(panel_x + 1 + bar_w, y, ']', value);
        let end = fb.put_u32(panel_x + 3 + bar_w, y, pct, value);
        fb.put_char(end, y, '%', value);
        y += 1;
        let end = fb.put_u32(panel_x, y, snap.matched_pairs, dim);
        fb.put_char(end, y, '/', dim);
        let end = fb.put_u32(end + 1, y, snap.total_pairs, dim);
        fb.put_str(end, y, " pairs", dim);
        y += 2;

        fb.put_str(panel_x, y, "STORE", label);
        fb.put_str(panel_x + 7, y, hud.backend.unwrap_or("..."), value);
        y += 2;

        fb.put_str(panel_x, y, "TOP SCORES", label);
        y += 1;
        if hud.scores.is_empty() {
            fb.put_str(panel_x, y, "no scores yet", dim);
            y += 1;
        }
        for (rank, row) in hud.scores.iter().enumerate() {
            if y + 3 >= viewport.height {
                break;
            }
            let end = fb.put_u32(panel_x, y, rank as u32 + 1, value);
            fb.put_char(end, y, '.', value);
            fb.put_str_clipped(end + 2, y, &row.label(), panel_w.saturating_sub(end + 2 - panel_x), value);
            y += 1;
        }

        y += 1;
        if y < viewport.height.saturating_sub(1) {
            fb.put_str_clipped(
                panel_x,
                y,
                "S start  R reset  T scores  Q quit",
                panel_w,
                dim,
            );
        }
    }

    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y + frame_h / 2;
        let text_w = text.chars().count() as u16 + 2;
        let x = start_x + frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(BG).bold();
        fb.put_char(x, mid_y, ' ', style);
        let end = fb.put_str(x + 1, mid_y, text, style);
        fb.put_char(end, mid_y, ' ', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_name_prompt(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        name: &str,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let w = frame_w.saturating_sub(4).max(20);
        let h = 7;
        let x = start_x + frame_w.saturating_sub(w) / 2;
        let y = start_y + frame_h.saturating_sub(h) / 2;

        let body = CellStyle::fg(Rgb::new(230, 230, 230)).on(Rgb::new(20, 20, 28));
        fb.fill_rect(x, y, w, h, ' ', body);
        fb.draw_box(x, y, w, h, body.bold());

        fb.put_str(x + 2, y + 1, "ALL PAIRS FOUND!", body.bold());
        let summary = format!(
            "{} pts  {}  {} moves",
            snap.score,
            format_duration(snap.elapsed_seconds),
            snap.moves
        );
        fb.put_str_clipped(x + 2, y + 2, &summary, w - 4, body);
        let end = fb.put_str(x + 2, y + 4, "NAME ", body.bold());
        let end = fb.put_str_clipped(end, y + 4, name, x + w - 3 - end, body);
        fb.put_char(end, y + 4, '_', body);
        fb.put_str_clipped(x + 2, y + 5, "ENTER save  ESC skip", w - 4, body.dim());
    }
}

fn symbol_color(symbol: Symbol) -> Rgb {
    match symbol {
        Symbol::Dog => Rgb::new(230, 170, 90),
        Symbol::Cat => Rgb::new(240, 220, 80),
        Symbol::Mouse => Rgb::new(190, 190, 200),
        Symbol::Hamster => Rgb::new(255, 150, 60),
        Symbol::Rabbit => Rgb::new(250, 250, 250),
        Symbol::Fox => Rgb::new(240, 100, 50),
        Symbol::Bear => Rgb::new(180, 120, 80),
        Symbol::Panda => Rgb::new(140, 220, 140),
    }
}
