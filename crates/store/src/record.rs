//! Score record wire types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::GameResult;
use crate::error::StoreError;

/// Insert payload: one finished game, before the store stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScore {
    pub player_name: String,
    pub score: u32,
    pub game_duration_seconds: u32,
    pub attempts: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
}

impl NewScore {
    /// Build from a completed game. The name is trimmed and must not be empty.
    pub fn from_result(player_name: &str, result: &GameResult) -> Result<Self, StoreError> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        Ok(Self {
            player_name: player_name.to_string(),
            score: result.score,
            game_duration_seconds: result.duration_seconds,
            attempts: result.attempts,
            matched_pairs: result.matched_pairs,
            total_pairs: result.total_pairs,
        })
    }
}

/// A stored row. Immutable once written.
///
/// `time_taken` and `moves` are accepted as aliases for rows written by older
/// clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub player_name: String,
    pub score: u32,
    #[serde(alias = "time_taken", default)]
    pub game_duration_seconds: u32,
    #[serde(alias = "moves", default)]
    pub attempts: u32,
    #[serde(default)]
    pub matched_pairs: u32,
    #[serde(default)]
    pub total_pairs: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ScoreRecord {
    pub fn stamp(score: &NewScore, id: Option<i64>, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            player_name: score.player_name.clone(),
            score: score.score,
            game_duration_seconds: score.game_duration_seconds,
            attempts: score.attempts,
            matched_pairs: score.matched_pairs,
            total_pairs: score.total_pairs,
            created_at,
        }
    }
}

/// Sort by score descending and keep the first `limit`.
///
/// The sort is stable: among equal scores, earlier entries keep their rank.
pub fn rank_records(records: &mut Vec<ScoreRecord>, limit: usize) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(limit);
}
