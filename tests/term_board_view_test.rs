use memory_match::core::{GameSession, SessionSnapshot};
use memory_match::term::{AnchorY, BoardView, FrameBuffer, Hud, ScoreRow, Viewport};
use memory_match::types::{Symbol, MATCH_REVEAL_MS};

fn top_view() -> BoardView {
    BoardView::default().with_anchor_y(AnchorY::Top)
}

/// Where the table starts for a default view at the given width.
fn table_origin(view: &BoardView, vp: Viewport) -> (u16, u16) {
    let (frame_w, _) = view.table_size(16);
    (vp.width.saturating_sub(frame_w + 2 + 34) / 2, 0)
}

#[test]
fn term_view_renders_table_border() {
    let view = top_view();
    let vp = Viewport::new(100, 30);
    let fb = view.render(&GameSession::new(1).snapshot(), &Hud::default(), vp);
    let (x, y) = table_origin(&view, vp);
    let (w, h) = view.table_size(16);

    assert_eq!(fb.get(x, y).unwrap().ch, '┌');
    assert_eq!(fb.get(x + w - 1, y).unwrap().ch, '┐');
    assert_eq!(fb.get(x, y + h - 1).unwrap().ch, '└');
    assert_eq!(fb.get(x + w - 1, y + h - 1).unwrap().ch, '┘');
}

#[test]
fn term_view_reveals_only_face_up_cards() {
    let mut session = GameSession::new(8);
    session.start();
    let a = session
        .cards()
        .iter()
        .find(|c| c.symbol() == Symbol::Panda)
        .unwrap()
        .id();
    session.handle_pick(a);

    let view = top_view();
    let vp = Viewport::new(100, 30);
    let fb = view.render(&session.snapshot(), &Hud::default(), vp);
    let (sx, sy) = table_origin(&view, vp);

    for card in session.cards() {
        let (x, y) = view.card_origin(sx, sy, card.id());
        let ch = fb.get(x + 3, y + 1).unwrap().ch;
        if card.id() == a {
            assert_eq!(ch, 'P');
        } else {
            assert_eq!(ch, '?');
        }
    }
}

#[test]
fn term_view_cursor_border_is_highlighted() {
    let session = GameSession::new(2);
    let view = top_view();
    let vp = Viewport::new(100, 30);
    let (sx, sy) = table_origin(&view, vp);

    let plain = view.render(&session.snapshot(), &Hud::default(), vp);
    let hud = Hud {
        cursor: Some(5),
        ..Hud::default()
    };
    let focused = view.render(&session.snapshot(), &hud, vp);

    let (x, y) = view.card_origin(sx, sy, 5);
    let before = plain.get(x, y).unwrap();
    let after = focused.get(x, y).unwrap();
    assert_eq!(before.ch, after.ch);
    assert_ne!(before.style, after.style);
    assert!(after.style.bold);
}

#[test]
fn term_view_matched_pair_changes_style_after_reveal() {
    let mut session = GameSession::new(4);
    session.start();
    let ids: Vec<usize> = session
        .cards()
        .iter()
        .filter(|c| c.symbol() == Symbol::Bear)
        .map(|c| c.id())
        .collect();
    session.handle_pick(ids[0]);
    session.handle_pick(ids[1]);

    let view = top_view();
    let vp = Viewport::new(100, 30);
    let (sx, sy) = table_origin(&view, vp);
    let (x, y) = view.card_origin(sx, sy, ids[0]);

    let settling = view.render(&session.snapshot(), &Hud::default(), vp);
    session.advance(MATCH_REVEAL_MS);
    let matched = view.render(&session.snapshot(), &Hud::default(), vp);

    assert_eq!(settling.get(x + 3, y + 1).unwrap().ch, 'B');
    assert_eq!(matched.get(x + 3, y + 1).unwrap().ch, 'B');
    assert_ne!(
        settling.get(x, y).unwrap().style,
        matched.get(x, y).unwrap().style
    );
}

#[test]
fn term_view_panel_shows_metrics() {
    let mut snap = SessionSnapshot::default();
    snap.started = true;
    snap.moves = 12;
    snap.score = 1784;
    snap.elapsed_seconds = 83;
    snap.matched_pairs = 4;
    snap.total_pairs = 8;

    let scores = [ScoreRow {
        player_name: "zed".into(),
        score: 2011,
        duration_seconds: 59,
        attempts: 9,
    }];
    let hud = Hud {
        backend: Some("REMOTE"),
        scores: &scores,
        ..Hud::default()
    };
    let fb = top_view().render(&snap, &hud, Viewport::new(100, 30));

    assert!(fb.contains_text("MOVES  12"));
    assert!(fb.contains_text("SCORE  1784"));
    assert!(fb.contains_text("TIME   01:23"));
    assert!(fb.contains_text("50%"));
    assert!(fb.contains_text("4/8 pairs"));
    assert!(fb.contains_text("REMOTE"));
    assert!(fb.contains_text("1. zed  2011 (0:59, 9)"));
}

#[test]
fn term_view_render_into_reuses_buffer_across_sizes() {
    let session = GameSession::new(1);
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&session.snapshot(), &Hud::default(), Viewport::new(100, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 30));
    view.render_into(&session.snapshot(), &Hud::default(), Viewport::new(60, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (60, 20));
    assert_eq!(fb.cells().len(), 1200);
}
