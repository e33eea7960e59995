//! PairStanding: one pair's aggregate result within one tournament.

use crate::models::pair::Pair;
use serde::{Deserialize, Serialize};

/// Computed from a tournament's completed matches; never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairStanding {
    pub pair: Pair,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub games_won: u32,
    pub games_lost: u32,
    /// Assigned from the final rank position.
    pub points: u32,
}

impl PairStanding {
    /// Zeroed standing for a pair that has not played yet.
    pub fn new(pair: Pair) -> Self {
        Self {
            pair,
            matches_played: 0,
            wins: 0,
            losses: 0,
            games_won: 0,
            games_lost: 0,
            points: 0,
        }
    }

    /// Games won minus games lost.
    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }
}
