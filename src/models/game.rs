//! Match (game) between two pairs, with its score and status.

use crate::models::pair::PairId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Highest games count accepted for one side of a recorded result.
pub const MAX_GAMES_PER_SIDE: u32 = 99;

/// Whether a match has a result yet.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single match between two different pairs of one tournament.
///
/// Scores are games won by each side. Both are `None` while pending and both
/// `Some` once completed; [`GameMatch::record_score`] is the only way to set them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub pair1: PairId,
    pub pair2: PairId,
    pair1_score: Option<u32>,
    pair2_score: Option<u32>,
    pub status: MatchStatus,
}

impl GameMatch {
    /// A pending match with no scores. Callers pass two different pairs.
    pub fn pending(tournament_id: TournamentId, pair1: PairId, pair2: PairId) -> Self {
        debug_assert_ne!(pair1, pair2, "a match needs two different pairs");
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            pair1,
            pair2,
            pair1_score: None,
            pair2_score: None,
            status: MatchStatus::Pending,
        }
    }

    /// Set both scores and mark the match completed. Overwrites a previous result.
    pub fn record_score(&mut self, pair1_score: u32, pair2_score: u32) {
        self.pair1_score = Some(pair1_score);
        self.pair2_score = Some(pair2_score);
        self.status = MatchStatus::Completed;
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// `(pair1_score, pair2_score)` if completed.
    pub fn score(&self) -> Option<(u32, u32)> {
        match (self.pair1_score, self.pair2_score) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn involves(&self, pair_id: PairId) -> bool {
        self.pair1 == pair_id || self.pair2 == pair_id
    }
}
