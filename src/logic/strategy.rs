//! Format strategies: start validation, match generation and standings.

use crate::models::{
    GameMatch, PairId, PairStanding, Precondition, Tournament, TournamentError, TournamentFormat,
};
use std::collections::{HashMap, HashSet};

/// Points for the first three rank positions. Every later rank gets [`DEFAULT_RANK_POINTS`].
pub const RANK_POINTS: [u32; 3] = [10, 6, 3];
pub const DEFAULT_RANK_POINTS: u32 = 1;

/// Pairs required by a quadrangular tournament.
pub const QUADRANGULAR_PAIRS: usize = 4;
/// Minimum pairs for an open round robin.
pub const ROUND_ROBIN_MIN_PAIRS: usize = 2;

/// Points earned for finishing at `rank` (0-based). Shared by every format.
pub fn points_for_rank(rank: usize) -> u32 {
    RANK_POINTS.get(rank).copied().unwrap_or(DEFAULT_RANK_POINTS)
}

/// The behavior of one tournament format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TournamentStrategy {
    /// Four pairs, everyone plays everyone once.
    Quadrangular,
    /// Any number of pairs (at least two), everyone plays everyone once.
    RoundRobin,
}

impl TournamentStrategy {
    pub fn format(&self) -> TournamentFormat {
        match self {
            TournamentStrategy::Quadrangular => TournamentFormat::Quadrangular,
            TournamentStrategy::RoundRobin => TournamentFormat::RoundRobin,
        }
    }

    /// Check the pair set can start this format. No side effects; safe to call repeatedly.
    pub fn validate_before_start(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        let actual = tournament.pairs.len();
        match self {
            TournamentStrategy::Quadrangular => {
                if actual != QUADRANGULAR_PAIRS {
                    return Err(Precondition::WrongPairCount {
                        format: self.format(),
                        required: QUADRANGULAR_PAIRS,
                        actual,
                    }
                    .into());
                }
            }
            TournamentStrategy::RoundRobin => {
                if actual < ROUND_ROBIN_MIN_PAIRS {
                    return Err(Precondition::NotEnoughPairs {
                        format: self.format(),
                        minimum: ROUND_ROBIN_MIN_PAIRS,
                        actual,
                    }
                    .into());
                }
            }
        }
        check_no_shared_players(tournament)?;
        Ok(())
    }

    /// Full schedule for the current pair set, all pending.
    pub fn generate_matches(&self, tournament: &Tournament) -> Vec<GameMatch> {
        match self {
            TournamentStrategy::Quadrangular | TournamentStrategy::RoundRobin => {
                round_robin_matches(tournament)
            }
        }
    }

    /// One standing per participating pair, in ranked order, with points assigned.
    pub fn calculate_standings(&self, tournament: &Tournament) -> Vec<PairStanding> {
        match self {
            TournamentStrategy::Quadrangular | TournamentStrategy::RoundRobin => {
                let mut standings = round_robin_standings(tournament);
                assign_rank_points(&mut standings);
                standings
            }
        }
    }
}

fn check_no_shared_players(tournament: &Tournament) -> Result<(), Precondition> {
    let mut seen = HashSet::new();
    for pair in &tournament.pairs {
        for player in pair.players() {
            if !seen.insert(player) {
                return Err(Precondition::PlayerInTwoPairs(player));
            }
        }
    }
    Ok(())
}

/// Every unordered pair-of-pairs once, in entry order: (0,1), (0,2), ..., (n-2,n-1).
fn round_robin_matches(tournament: &Tournament) -> Vec<GameMatch> {
    let pairs = &tournament.pairs;
    let mut matches = Vec::with_capacity(pairs.len() * pairs.len().saturating_sub(1) / 2);
    for (i, a) in pairs.iter().enumerate() {
        for b in &pairs[i + 1..] {
            matches.push(GameMatch::pending(tournament.id, a.id, b.id));
        }
    }
    matches
}

/// Tally completed matches, then sort by wins, game difference and pair id.
///
/// Pending matches contribute nothing. Equal scores count as played with games
/// tallied, but move neither the wins nor the losses counter.
fn round_robin_standings(tournament: &Tournament) -> Vec<PairStanding> {
    let mut standings: Vec<PairStanding> = tournament
        .pairs
        .iter()
        .cloned()
        .map(PairStanding::new)
        .collect();
    let index: HashMap<PairId, usize> = standings
        .iter()
        .enumerate()
        .map(|(i, s)| (s.pair.id, i))
        .collect();

    for m in &tournament.matches {
        let Some((score1, score2)) = m.score() else {
            continue;
        };
        let (Some(&i1), Some(&i2)) = (index.get(&m.pair1), index.get(&m.pair2)) else {
            log::warn!(
                "Match {} in tournament {} references a pair that is not participating; skipped",
                m.id,
                tournament.id
            );
            continue;
        };

        tally(&mut standings[i1], score1, score2);
        tally(&mut standings[i2], score2, score1);

        if score1 > score2 {
            standings[i1].wins += 1;
            standings[i2].losses += 1;
        } else if score2 > score1 {
            standings[i2].wins += 1;
            standings[i1].losses += 1;
        }
    }

    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.game_difference().cmp(&a.game_difference()))
            .then_with(|| a.pair.id.cmp(&b.pair.id))
    });
    standings
}

/// Saturating, so results written straight to a match cannot overflow the totals.
fn tally(standing: &mut PairStanding, games_for: u32, games_against: u32) {
    standing.matches_played = standing.matches_played.saturating_add(1);
    standing.games_won = standing.games_won.saturating_add(games_for);
    standing.games_lost = standing.games_lost.saturating_add(games_against);
}

/// Overwrite `points` from each standing's position in the (already sorted) slice.
pub fn assign_rank_points(standings: &mut [PairStanding]) {
    for (rank, standing) in standings.iter_mut().enumerate() {
        standing.points = points_for_rank(rank);
    }
}
