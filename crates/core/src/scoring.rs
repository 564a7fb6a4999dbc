//! Scoring module - the session score formula
//!
//! ```text
//! score       = max(0, 1000 + timeBonus - movePenalty + matchBonus)
//! timeBonus   = max(0, 300 - elapsedSeconds) * 2
//! movePenalty = movesCount * 10
//! matchBonus  = matchedPairsCount * 100
//! ```
//!
//! The formula is a pure function of the session counters, so the live score
//! can be recomputed after every pick or clock tick.

use crate::types::{BASE_SCORE, MATCH_BONUS, MOVE_PENALTY, TIME_BONUS_PER_SEC, TIME_BONUS_WINDOW_SECS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub time_bonus: u32,
    pub move_penalty: u32,
    pub match_bonus: u32,
    /// Floored at zero.
    pub total: u32,
}

/// Bonus for finishing inside the time window.
pub fn calculate_time_bonus(elapsed_secs: u32) -> u32 {
    TIME_BONUS_WINDOW_SECS
        .saturating_sub(elapsed_secs)
        .saturating_mul(TIME_BONUS_PER_SEC)
}

pub fn calculate_move_penalty(moves: u32) -> u32 {
    moves.saturating_mul(MOVE_PENALTY)
}

pub fn calculate_match_bonus(matched_pairs: u32) -> u32 {
    matched_pairs.saturating_mul(MATCH_BONUS)
}

/// Calculate the full score for the given session counters.
pub fn calculate_score(moves: u32, elapsed_secs: u32, matched_pairs: u32) -> ScoreBreakdown {
    let base = BASE_SCORE;
    let time_bonus = calculate_time_bonus(elapsed_secs);
    let move_penalty = calculate_move_penalty(moves);
    let match_bonus = calculate_match_bonus(matched_pairs);

    let total = base
        .saturating_add(time_bonus)
        .saturating_add(match_bonus)
        .saturating_sub(move_penalty);

    ScoreBreakdown {
        base,
        time_bonus,
        move_penalty,
        match_bonus,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_instant_game() {
        let result = calculate_score(0, 0, 8);
        assert_eq!(result.time_bonus, 600);
        assert_eq!(result.match_bonus, 800);
        assert_eq!(result.total, 2400);
    }

    #[test]
    fn test_slow_game_has_no_time_bonus() {
        let result = calculate_score(50, 400, 8);
        assert_eq!(result.time_bonus, 0);
        assert_eq!(result.move_penalty, 500);
        assert_eq!(result.match_bonus, 800);
        assert_eq!(result.total, 1300);
    }

    #[test]
    fn test_time_bonus_edges() {
        assert_eq!(calculate_time_bonus(0), 600);
        assert_eq!(calculate_time_bonus(299), 2);
        assert_eq!(calculate_time_bonus(300), 0);
        assert_eq!(calculate_time_bonus(u32::MAX), 0);
    }

    #[test]
    fn test_score_floors_at_zero() {
        assert_eq!(calculate_score(500, 1000, 0).total, 0);
        assert_eq!(calculate_score(u32::MAX, u32::MAX, 0).total, 0);
    }

    #[test]
    fn test_live_score_before_any_move() {
        // Fresh session: base plus the full time bonus.
        assert_eq!(calculate_score(0, 0, 0).total, 1600);
    }

    #[test]
    fn test_penalty_exactly_cancels() {
        // 1000 + 0 + 0 - 100 * 10
        assert_eq!(calculate_score(100, 300, 0).total, 0);
        assert_eq!(calculate_score(99, 300, 0).total, 10);
    }
}
