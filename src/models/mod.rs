//! Data structures: players, pairs, tournaments, matches, standings and stats.

mod game;
mod pair;
mod player;
mod standing;
mod stats;
mod tournament;

pub use game::{GameMatch, MatchId, MatchStatus, MAX_GAMES_PER_SIDE};
pub use pair::{NewPair, Pair, PairId, PairUpdate};
pub use player::{Gender, NewPlayer, Player, PlayerId, PlayerSummary, PlayerUpdate};
pub use standing::PairStanding;
pub use stats::{percentage, PlayerCareerStats, PlayerRanking};
pub use tournament::{
    Category, ErrorKind, NewTournament, Precondition, Tournament, TournamentError,
    TournamentFormat, TournamentId, TournamentProgress, TournamentStatus, TournamentSummary,
    TournamentUpdate, WinningMatchRule,
};
