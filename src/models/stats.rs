//! Player-level statistics aggregated across tournaments.

use crate::models::player::{Gender, PlayerId, PlayerSummary};
use serde::{Deserialize, Serialize};

/// Career totals for one player, summed over the standings of their pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerCareerStats {
    pub player: PlayerSummary,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    /// matches_won / matches_played * 100, or 0.0 with no matches.
    pub matches_efficiency: f64,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    /// games_won / (games_won + games_lost) * 100, or 0.0 with no games.
    pub games_efficiency: f64,
}

/// One row of the points ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub id: PlayerId,
    pub name: String,
    pub last_name: String,
    pub gender: Gender,
    pub total_points: u32,
    /// Tournaments matching the ranking's category/gender filters.
    pub tournaments_played: u32,
}

/// `part / whole * 100`, or 0.0 when `whole` is zero.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}
