//! Tournament business logic: format strategies, lifecycle and ranking aggregation.

mod lifecycle;
mod ranking;
mod selector;
mod strategy;

pub use lifecycle::{check_transition, finalize, start_tournament, try_finalize, update_status};
pub use ranking::{career_stats, player_standing_in, ranking_entry, sort_career_stats, sort_rankings};
pub use selector::StrategySelector;
pub use strategy::{
    assign_rank_points, points_for_rank, TournamentStrategy, DEFAULT_RANK_POINTS,
    QUADRANGULAR_PAIRS, RANK_POINTS, ROUND_ROBIN_MIN_PAIRS,
};
