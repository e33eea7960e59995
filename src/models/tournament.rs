//! Tournament, its status/format enums, and the crate error type.

use crate::models::game::{GameMatch, MatchId, MAX_GAMES_PER_SIDE};
use crate::models::pair::{Pair, PairId};
use crate::models::player::{Gender, PlayerId};
use crate::storage::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A format-specific rule that must hold before a tournament can start.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Precondition {
    #[error("a {format} tournament must have exactly {required} pairs (has {actual})")]
    WrongPairCount {
        format: TournamentFormat,
        required: usize,
        actual: usize,
    },
    #[error("a {format} tournament needs at least {minimum} pairs (has {actual})")]
    NotEnoughPairs {
        format: TournamentFormat,
        minimum: usize,
        actual: usize,
    },
    #[error("player {0} is in more than one participating pair")]
    PlayerInTwoPairs(PlayerId),
}

/// Errors that can occur during tournament operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found with ID: {0}")]
    TournamentNotFound(TournamentId),
    #[error("Pair not found with ID: {0}")]
    PairNotFound(PairId),
    #[error("Player not found with ID: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Match not found with ID: {0}")]
    MatchNotFound(MatchId),
    #[error("Pair {0} is not part of the tournament")]
    PairNotInTournament(PairId),

    #[error("Cannot start tournament: {0}")]
    Precondition(#[from] Precondition),
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: TournamentStatus,
        to: TournamentStatus,
    },
    #[error("No strategy registered for format {0}")]
    UnsupportedFormat(TournamentFormat),

    #[error("Tournament with name {0} already exists")]
    DuplicateTournamentName(String),
    #[error("Player with DNI {0} already exists")]
    DuplicateDni(String),
    #[error("Pair with team name {0} already exists")]
    DuplicateTeamName(String),
    #[error("Pair {0} is already added to the tournament")]
    PairAlreadyEntered(PairId),

    #[error("Cannot finalize tournament: {completed} of {total} matches completed")]
    IncompleteResults { completed: usize, total: usize },
    #[error("Action not allowed while tournament is {status}")]
    NotEditable { status: TournamentStatus },
    #[error("A pair needs two different players (got {0} twice)")]
    SamePlayerTwice(PlayerId),
    #[error("Score {score} is out of range (at most {max} games per side)")]
    ScoreOutOfRange { score: u32, max: u32 },
    #[error("Player {0} still belongs to a pair")]
    PlayerHasPairs(PlayerId),
    #[error("Pair {pair} is entered in tournament {tournament}")]
    PairInTournament { pair: PairId, tournament: TournamentId },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coarse classification of [`TournamentError`] for callers that only branch on kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    Precondition,
    InvalidTransition,
    UnsupportedFormat,
    AlreadyExists,
    InvalidRequest,
    Storage,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError as E;
        match self {
            E::TournamentNotFound(_)
            | E::PairNotFound(_)
            | E::PlayerNotFound(_)
            | E::MatchNotFound(_)
            | E::PairNotInTournament(_) => ErrorKind::NotFound,
            E::Precondition(_) => ErrorKind::Precondition,
            E::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            E::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            E::DuplicateTournamentName(_)
            | E::DuplicateDni(_)
            | E::DuplicateTeamName(_)
            | E::PairAlreadyEntered(_) => ErrorKind::AlreadyExists,
            E::IncompleteResults { .. }
            | E::NotEditable { .. }
            | E::SamePlayerTwice(_)
            | E::ScoreOutOfRange { .. }
            | E::PlayerHasPairs(_)
            | E::PairInTournament { .. } => ErrorKind::InvalidRequest,
            E::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competition format. Each format maps to one strategy variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Round robin between exactly four pairs.
    Quadrangular,
    /// Round robin between any number of pairs (at least two).
    RoundRobin,
}

impl TournamentFormat {
    pub const ALL: [TournamentFormat; 2] = [TournamentFormat::Quadrangular, TournamentFormat::RoundRobin];

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentFormat::Quadrangular => "quadrangular",
            TournamentFormat::RoundRobin => "round_robin",
        }
    }

    /// Parse the snake_case name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|f| f.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. See `logic::lifecycle` for the transition table.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting pairs; no matches yet.
    #[default]
    Created,
    /// Schedule generated; results being recorded.
    InProgress,
    /// Terminal.
    Finished,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Created => write!(f, "CREATED"),
            TournamentStatus::InProgress => write!(f, "IN_PROGRESS"),
            TournamentStatus::Finished => write!(f, "FINISHED"),
        }
    }
}

/// How a single match is won. Informational: scores are recorded as games per side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinningMatchRule {
    SingleSet,
    #[default]
    BestOfThreeSets,
}

/// Playing level of a tournament.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

/// Fields supplied when creating a tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub address: Option<String>,
    pub format: TournamentFormat,
    #[serde(default)]
    pub winning_match_rule: WinningMatchRule,
    pub category: Category,
    pub gender: Gender,
}

/// Partial update of a tournament's descriptive fields. `None` leaves a field as is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub format: Option<TournamentFormat>,
    pub winning_match_rule: Option<WinningMatchRule>,
    pub category: Option<Category>,
    pub gender: Option<Gender>,
}

/// Match completion counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentProgress {
    pub total_matches: usize,
    pub completed_matches: usize,
    pub status: TournamentStatus,
    /// 0.0 to 100.0; 0.0 when there are no matches.
    pub percentage: f64,
}

/// One row of the tournament list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub pair_count: usize,
    pub match_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Unique across tournaments.
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// Set when the tournament finishes.
    pub end_date: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub winning_match_rule: WinningMatchRule,
    pub category: Category,
    pub gender: Gender,
    /// Participating pairs, in entry order.
    pub pairs: Vec<Pair>,
    /// Empty until the tournament starts; never regenerated afterwards.
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Create a new tournament in Created state with no pairs or matches.
    pub fn new(new: NewTournament) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            start_date: new.start_date,
            end_date: None,
            address: new.address,
            format: new.format,
            status: TournamentStatus::Created,
            winning_match_rule: new.winning_match_rule,
            category: new.category,
            gender: new.gender,
            pairs: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn pair(&self, id: PairId) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// The participating pair that contains `player_id`, if any.
    pub fn pair_of_player(&self, player_id: PlayerId) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.contains(player_id))
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.pair_of_player(player_id).is_some()
    }

    pub fn matches_category_and_gender(&self, category: Option<Category>, gender: Option<Gender>) -> bool {
        category.map_or(true, |c| c == self.category) && gender.map_or(true, |g| g == self.gender)
    }

    pub fn completed_matches(&self) -> usize {
        self.matches.iter().filter(|m| m.is_completed()).count()
    }

    /// True when every match has a result. Vacuously true with no matches.
    pub fn all_matches_completed(&self) -> bool {
        self.matches.iter().all(GameMatch::is_completed)
    }

    /// Add a pair (only valid in Created).
    pub fn add_pair(&mut self, pair: Pair) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Created {
            return Err(TournamentError::NotEditable { status: self.status });
        }
        if self.pair(pair.id).is_some() {
            return Err(TournamentError::PairAlreadyEntered(pair.id));
        }
        self.pairs.push(pair);
        Ok(())
    }

    /// Remove a pair by id (only valid in Created).
    pub fn remove_pair(&mut self, pair_id: PairId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Created {
            return Err(TournamentError::NotEditable { status: self.status });
        }
        let idx = self
            .pairs
            .iter()
            .position(|p| p.id == pair_id)
            .ok_or(TournamentError::PairNotInTournament(pair_id))?;
        self.pairs.remove(idx);
        Ok(())
    }

    /// Record the score of one match (only valid in InProgress). Re-recording corrects a result.
    ///
    /// Each side is capped at [`MAX_GAMES_PER_SIDE`].
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        pair1_score: u32,
        pair2_score: u32,
    ) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::InProgress {
            return Err(TournamentError::NotEditable { status: self.status });
        }
        if let Some(score) = [pair1_score, pair2_score]
            .into_iter()
            .find(|s| *s > MAX_GAMES_PER_SIDE)
        {
            return Err(TournamentError::ScoreOutOfRange {
                score,
                max: MAX_GAMES_PER_SIDE,
            });
        }
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.record_score(pair1_score, pair2_score);
        Ok(())
    }

    /// Apply a descriptive update. The format can only change before the tournament starts.
    pub fn apply_update(&mut self, update: TournamentUpdate) -> Result<(), TournamentError> {
        if let Some(format) = update.format {
            if format != self.format && self.status != TournamentStatus::Created {
                return Err(TournamentError::NotEditable { status: self.status });
            }
            self.format = format;
        }
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(start) = update.start_date {
            self.start_date = start;
        }
        if update.end_date.is_some() {
            self.end_date = update.end_date;
        }
        if update.address.is_some() {
            self.address = update.address;
        }
        if let Some(rule) = update.winning_match_rule {
            self.winning_match_rule = rule;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        Ok(())
    }

    pub fn progress(&self) -> TournamentProgress {
        let total = self.matches.len();
        let completed = self.completed_matches();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 * 100.0 / total as f64
        };
        TournamentProgress {
            total_matches: total,
            completed_matches: completed,
            status: self.status,
            percentage,
        }
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            pair_count: self.pairs.len(),
            match_count: self.matches.len(),
        }
    }
}
