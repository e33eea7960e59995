//! Doubles tournament organizer: library with models, strategies, lifecycle and rankings.

pub mod config;
pub mod logic;
pub mod models;
pub mod service;
pub mod storage;

pub use config::{AppConfig, ConfigError};
pub use logic::{
    career_stats, check_transition, finalize, points_for_rank, ranking_entry, start_tournament,
    try_finalize, update_status, StrategySelector, TournamentStrategy,
};
pub use models::{
    Category, ErrorKind, GameMatch, Gender, MatchId, MatchStatus, NewPair, NewPlayer,
    NewTournament, Pair, PairId, PairStanding, PairUpdate, Player, PlayerCareerStats, PlayerId,
    PlayerRanking, PlayerSummary, PlayerUpdate, Precondition, Tournament, TournamentError,
    TournamentFormat, TournamentId, TournamentProgress, TournamentStatus, TournamentSummary,
    TournamentUpdate, WinningMatchRule, MAX_GAMES_PER_SIDE,
};
pub use service::TournamentService;
pub use storage::{InMemoryStorage, Storage, StorageError};
