//! Career stats and points rankings, aggregated over a player's tournaments.
//!
//! Everything here is recomputed from the tournaments passed in: each one is
//! replayed through its format's strategy and the standing of the player's pair
//! is summed. Nothing is cached.

use crate::logic::selector::StrategySelector;
use crate::models::{
    percentage, Category, Gender, PairStanding, Player, PlayerCareerStats, PlayerId,
    PlayerRanking, PlayerSummary, Tournament, TournamentError,
};
use std::cmp::Ordering;

/// Standing of the pair containing `player_id` in `tournament`, if the player took part.
pub fn player_standing_in(
    tournament: &Tournament,
    player_id: PlayerId,
    selector: &StrategySelector,
) -> Result<Option<PairStanding>, TournamentError> {
    if !tournament.has_player(player_id) {
        return Ok(None);
    }
    let strategy = selector.get_strategy(tournament.format)?;
    Ok(strategy
        .calculate_standings(tournament)
        .into_iter()
        .find(|s| s.pair.contains(player_id)))
}

/// Sum the player's pair standings over `tournaments`.
///
/// Tournaments the player is not part of are ignored.
pub fn career_stats(
    player: &Player,
    tournaments: &[Tournament],
    selector: &StrategySelector,
) -> Result<PlayerCareerStats, TournamentError> {
    let mut matches_played = 0;
    let mut matches_won = 0;
    let mut matches_lost = 0;
    let mut games_won = 0;
    let mut games_lost = 0;

    for tournament in tournaments {
        if let Some(s) = player_standing_in(tournament, player.id, selector)? {
            matches_played = s.matches_played.saturating_add(matches_played);
            matches_won = s.wins.saturating_add(matches_won);
            matches_lost = s.losses.saturating_add(matches_lost);
            games_won = s.games_won.saturating_add(games_won);
            games_lost = s.games_lost.saturating_add(games_lost);
        }
    }

    let games_played = games_won.saturating_add(games_lost);
    Ok(PlayerCareerStats {
        player: PlayerSummary::from_player(player),
        matches_played,
        matches_won,
        matches_lost,
        matches_efficiency: percentage(matches_won, matches_played),
        games_played,
        games_won,
        games_lost,
        games_efficiency: percentage(games_won, games_played),
    })
}

/// Order by match efficiency, then matches won (both descending), then player id.
pub fn sort_career_stats(stats: &mut [PlayerCareerStats]) {
    stats.sort_by(|a, b| {
        b.matches_efficiency
            .total_cmp(&a.matches_efficiency)
            .then_with(|| b.matches_won.cmp(&a.matches_won))
            .then_with(|| a.player.id.cmp(&b.player.id))
    });
}

/// Ranking row for `player` over the tournaments matching `category` and `gender`.
///
/// `None` filters match everything. Returns `Ok(None)` when no tournament qualifies.
/// Points only come from tournaments where the player's pair has played at least one match.
pub fn ranking_entry(
    player: &Player,
    tournaments: &[Tournament],
    category: Option<Category>,
    gender: Option<Gender>,
    selector: &StrategySelector,
) -> Result<Option<PlayerRanking>, TournamentError> {
    let qualifying: Vec<&Tournament> = tournaments
        .iter()
        .filter(|t| t.has_player(player.id) && t.matches_category_and_gender(category, gender))
        .collect();
    if qualifying.is_empty() {
        return Ok(None);
    }

    let mut total_points = 0;
    for tournament in &qualifying {
        if let Some(s) = player_standing_in(tournament, player.id, selector)? {
            if s.matches_played > 0 {
                total_points = s.points.saturating_add(total_points);
            }
        }
    }

    Ok(Some(PlayerRanking {
        id: player.id,
        name: player.name.clone(),
        last_name: player.last_name.clone(),
        gender: player.gender,
        total_points,
        tournaments_played: qualifying.len() as u32,
    }))
}

/// Order by total points, then tournaments played (both descending), then player id.
pub fn sort_rankings(rankings: &mut [PlayerRanking]) {
    rankings.sort_by(|a, b| match b.total_points.cmp(&a.total_points) {
        Ordering::Equal => b
            .tournaments_played
            .cmp(&a.tournaments_played)
            .then_with(|| a.id.cmp(&b.id)),
        other => other,
    });
}
