//! Pair: a doubles team of two distinct players.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pair.
pub type PairId = Uuid;

/// Fields supplied when registering a pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPair {
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub team_name: String,
}

/// Replacement members and name for a pair that is not entered in any tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairUpdate {
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub team_name: String,
}

/// A doubles team. Membership does not change once the pair is entered in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub team_name: String,
}

impl Pair {
    /// Create a pair. Fails if both sides are the same player.
    pub fn new(
        player1: PlayerId,
        player2: PlayerId,
        team_name: impl Into<String>,
    ) -> Result<Self, TournamentError> {
        if player1 == player2 {
            return Err(TournamentError::SamePlayerTwice(player1));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            player1,
            player2,
            team_name: team_name.into().trim().to_string(),
        })
    }

    /// True if either member is `player_id`.
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.player1 == player_id || self.player2 == player_id
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.player1, self.player2]
    }

    /// The same pair id with new members and name. Fails if both sides are the same player.
    pub fn updated(&self, update: PairUpdate) -> Result<Self, TournamentError> {
        let mut pair = Pair::new(update.player1, update.player2, update.team_name)?;
        pair.id = self.id;
        Ok(pair)
    }
}
