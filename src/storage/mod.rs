//! Storage collaborator: what the engine needs from persistence.
//!
//! The engine does no I/O itself. Every operation that returns
//! `TournamentError` checks its uniqueness or membership rule and writes in one
//! atomic step. [`Storage::update_tournament`] hands the closure the current
//! record and commits its changes only if it returns `Ok`.

mod memory;

pub use memory::InMemoryStorage;

use crate::models::{Pair, PairId, Player, PlayerId, Tournament, TournamentError, TournamentId};
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Mutation applied to one tournament inside [`Storage::update_tournament`].
pub type TournamentMutation<'a> = &'a mut dyn FnMut(&mut Tournament) -> Result<(), TournamentError>;

/// Names, team names and DNIs compare case-insensitively, ignoring surrounding whitespace.
pub trait Storage: Send + Sync {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError>;
    fn all_tournaments(&self) -> Result<Vec<Tournament>, StorageError>;
    /// Store a new tournament unless its name is taken (`DuplicateTournamentName`).
    fn insert_tournament(&self, tournament: Tournament) -> Result<Tournament, TournamentError>;
    /// Returns false if there was nothing to delete.
    fn delete_tournament(&self, id: TournamentId) -> Result<bool, StorageError>;
    fn tournament_exists(&self, id: TournamentId) -> Result<bool, StorageError>;
    /// Tournaments with a participating pair that contains `player_id`.
    fn tournaments_with_player(&self, player_id: PlayerId) -> Result<Vec<Tournament>, StorageError>;

    /// Read, mutate and write back one tournament as a single atomic step.
    ///
    /// Fails with `TournamentNotFound` if the id is unknown, and with
    /// `DuplicateTournamentName` if the mutation renames it to a name another
    /// tournament holds. On any error the stored record is left untouched.
    fn update_tournament(
        &self,
        id: TournamentId,
        apply: TournamentMutation<'_>,
    ) -> Result<Tournament, TournamentError>;

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError>;
    fn all_players(&self) -> Result<Vec<Player>, StorageError>;
    /// Store a new player unless the DNI is taken (`DuplicateDni`).
    fn insert_player(&self, player: Player) -> Result<Player, TournamentError>;
    /// Replace an existing player by id (`PlayerNotFound`, `DuplicateDni`).
    fn replace_player(&self, player: Player) -> Result<Player, TournamentError>;
    /// Remove a player that belongs to no pair (`PlayerNotFound`, `PlayerHasPairs`).
    fn delete_player(&self, id: PlayerId) -> Result<(), TournamentError>;

    fn find_pair(&self, id: PairId) -> Result<Option<Pair>, StorageError>;
    fn all_pairs(&self) -> Result<Vec<Pair>, StorageError>;
    /// Store a new pair of two registered players unless the team name is taken
    /// (`PlayerNotFound`, `DuplicateTeamName`).
    fn insert_pair(&self, pair: Pair) -> Result<Pair, TournamentError>;
    /// Replace a pair that is entered in no tournament, with the same checks as
    /// `insert_pair` (`PairNotFound`, `PairInTournament`).
    fn replace_pair(&self, pair: Pair) -> Result<Pair, TournamentError>;
    /// Remove a pair that is entered in no tournament (`PairNotFound`, `PairInTournament`).
    fn delete_pair(&self, id: PairId) -> Result<(), TournamentError>;
    fn pairs_with_player(&self, player_id: PlayerId) -> Result<Vec<Pair>, StorageError>;
}
