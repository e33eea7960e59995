//! Id-based operations over a [`Storage`]: roster, lifecycle, results, standings and rankings.
//!
//! Each state-changing call is a single storage operation: uniqueness and
//! membership checks run under the same lock as the write, and tournament
//! changes go through `Storage::update_tournament`.

use crate::logic::{self, StrategySelector};
use crate::models::{
    Category, GameMatch, Gender, MatchId, NewPair, NewPlayer, NewTournament, Pair, PairId,
    PairStanding, PairUpdate, Player, PlayerCareerStats, PlayerId, PlayerRanking, PlayerUpdate,
    Tournament, TournamentError, TournamentId, TournamentProgress, TournamentStatus,
    TournamentSummary, TournamentUpdate,
};
use crate::storage::Storage;

pub struct TournamentService<S> {
    storage: S,
    selector: StrategySelector,
}

impl<S: Storage> TournamentService<S> {
    pub fn new(storage: S, selector: StrategySelector) -> Self {
        Self { storage, selector }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn selector(&self) -> &StrategySelector {
        &self.selector
    }

    // ---- players and pairs ----

    /// Register a player. The DNI must be unique.
    pub fn create_player(&self, new: NewPlayer) -> Result<Player, TournamentError> {
        let player = self.storage.insert_player(Player::from(new))?;
        log::info!("Registered player {} ({})", player.id, player.full_name());
        Ok(player)
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Player, TournamentError> {
        self.storage
            .find_player(id)?
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    pub fn list_players(&self) -> Result<Vec<Player>, TournamentError> {
        Ok(self.storage.all_players()?)
    }

    /// Change a player's names or phone number.
    pub fn update_player(&self, id: PlayerId, update: PlayerUpdate) -> Result<Player, TournamentError> {
        let mut player = self.get_player(id)?;
        player.apply_update(update);
        self.storage.replace_player(player)
    }

    /// Remove a player that is not a member of any pair.
    pub fn delete_player(&self, id: PlayerId) -> Result<(), TournamentError> {
        self.storage.delete_player(id)?;
        log::info!("Deleted player {}", id);
        Ok(())
    }

    /// Register a pair of two existing, different players under a unique team name.
    pub fn create_pair(&self, new: NewPair) -> Result<Pair, TournamentError> {
        let pair = self
            .storage
            .insert_pair(Pair::new(new.player1, new.player2, new.team_name)?)?;
        log::info!("Registered pair {} ({})", pair.id, pair.team_name);
        Ok(pair)
    }

    /// Replace a pair's members and team name. Refused while the pair is entered in a tournament.
    pub fn update_pair(&self, id: PairId, update: PairUpdate) -> Result<Pair, TournamentError> {
        let pair = self.get_pair(id)?.updated(update)?;
        self.storage.replace_pair(pair)
    }

    /// Remove a pair. Refused while the pair is entered in a tournament.
    pub fn delete_pair(&self, id: PairId) -> Result<(), TournamentError> {
        self.storage.delete_pair(id)?;
        log::info!("Deleted pair {}", id);
        Ok(())
    }

    pub fn get_pair(&self, id: PairId) -> Result<Pair, TournamentError> {
        self.storage
            .find_pair(id)?
            .ok_or(TournamentError::PairNotFound(id))
    }

    pub fn list_pairs(&self) -> Result<Vec<Pair>, TournamentError> {
        Ok(self.storage.all_pairs()?)
    }

    pub fn pairs_of_player(&self, player_id: PlayerId) -> Result<Vec<Pair>, TournamentError> {
        self.get_player(player_id)?;
        Ok(self.storage.pairs_with_player(player_id)?)
    }

    // ---- tournaments ----

    /// Create a tournament in Created status. The name must be unique.
    pub fn create_tournament(&self, new: NewTournament) -> Result<Tournament, TournamentError> {
        let tournament = self.storage.insert_tournament(Tournament::new(new))?;
        log::info!("Created tournament {} ({})", tournament.id, tournament.name);
        Ok(tournament)
    }

    pub fn get_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.storage
            .find_tournament(id)?
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    pub fn list_tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        Ok(self.storage.all_tournaments()?)
    }

    /// Update descriptive fields. A new name must not belong to another tournament.
    pub fn update_tournament(
        &self,
        id: TournamentId,
        update: TournamentUpdate,
    ) -> Result<Tournament, TournamentError> {
        self.storage.update_tournament(id, &mut |t: &mut Tournament| {
            t.apply_update(update.clone())
        })
    }

    pub fn delete_tournament(&self, id: TournamentId) -> Result<(), TournamentError> {
        if !self.storage.delete_tournament(id)? {
            return Err(TournamentError::TournamentNotFound(id));
        }
        log::info!("Deleted tournament {}", id);
        Ok(())
    }

    pub fn add_pair_to_tournament(
        &self,
        tournament_id: TournamentId,
        pair_id: PairId,
    ) -> Result<Tournament, TournamentError> {
        let pair = self.get_pair(pair_id)?;
        self.storage
            .update_tournament(tournament_id, &mut |t: &mut Tournament| t.add_pair(pair.clone()))
    }

    pub fn remove_pair_from_tournament(
        &self,
        tournament_id: TournamentId,
        pair_id: PairId,
    ) -> Result<Tournament, TournamentError> {
        self.get_pair(pair_id)?;
        self.storage
            .update_tournament(tournament_id, &mut |t: &mut Tournament| t.remove_pair(pair_id))
    }

    pub fn pairs_in_tournament(&self, id: TournamentId) -> Result<Vec<Pair>, TournamentError> {
        Ok(self.get_tournament(id)?.pairs)
    }

    pub fn summaries(&self) -> Result<Vec<TournamentSummary>, TournamentError> {
        Ok(self
            .storage
            .all_tournaments()?
            .iter()
            .map(Tournament::summary)
            .collect())
    }

    // ---- lifecycle ----

    /// Created → InProgress, generating the match schedule.
    pub fn start(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let selector = &self.selector;
        self.storage.update_tournament(id, &mut |t: &mut Tournament| {
            logic::start_tournament(t, selector)
        })
    }

    /// Explicit status change, validated by the transition table.
    pub fn update_status(
        &self,
        id: TournamentId,
        new_status: TournamentStatus,
    ) -> Result<Tournament, TournamentError> {
        let selector = &self.selector;
        self.storage.update_tournament(id, &mut |t: &mut Tournament| {
            logic::update_status(t, new_status, selector)
        })
    }

    /// Finish if every match is completed; otherwise return the tournament unchanged.
    pub fn try_finalize(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let current = self.get_tournament(id)?;
        if current.status != TournamentStatus::InProgress || !current.all_matches_completed() {
            return Ok(current);
        }
        self.storage.update_tournament(id, &mut |t: &mut Tournament| {
            logic::try_finalize(t);
            Ok(())
        })
    }

    /// Finish the tournament, failing while any match is pending.
    pub fn finalize(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.storage
            .update_tournament(id, &mut |t: &mut Tournament| logic::finalize(t))
    }

    // ---- matches and standings ----

    /// Record a match score, then finish the tournament if that was the last pending match.
    pub fn record_result(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        pair1_score: u32,
        pair2_score: u32,
    ) -> Result<Tournament, TournamentError> {
        let updated = self.storage.update_tournament(tournament_id, &mut |t: &mut Tournament| {
            t.record_result(match_id, pair1_score, pair2_score)?;
            logic::try_finalize(t);
            Ok(())
        })?;
        log::info!(
            "Recorded {}-{} for match {} in tournament {}",
            pair1_score,
            pair2_score,
            match_id,
            tournament_id
        );
        Ok(updated)
    }

    pub fn matches(&self, id: TournamentId) -> Result<Vec<GameMatch>, TournamentError> {
        Ok(self.get_tournament(id)?.matches)
    }

    pub fn standings(&self, id: TournamentId) -> Result<Vec<PairStanding>, TournamentError> {
        let tournament = self.get_tournament(id)?;
        let strategy = self.selector.get_strategy(tournament.format)?;
        Ok(strategy.calculate_standings(&tournament))
    }

    pub fn progress(&self, id: TournamentId) -> Result<TournamentProgress, TournamentError> {
        Ok(self.get_tournament(id)?.progress())
    }

    // ---- aggregation ----

    pub fn player_career_stats(&self, player_id: PlayerId) -> Result<PlayerCareerStats, TournamentError> {
        let player = self.get_player(player_id)?;
        let tournaments = self.storage.tournaments_with_player(player_id)?;
        logic::career_stats(&player, &tournaments, &self.selector)
    }

    /// Career stats of every registered player, best match efficiency first.
    pub fn all_players_career_stats(&self) -> Result<Vec<PlayerCareerStats>, TournamentError> {
        let mut stats = self
            .storage
            .all_players()?
            .iter()
            .map(|player| {
                let tournaments = self.storage.tournaments_with_player(player.id)?;
                logic::career_stats(player, &tournaments, &self.selector)
            })
            .collect::<Result<Vec<_>, TournamentError>>()?;
        logic::sort_career_stats(&mut stats);
        Ok(stats)
    }

    /// Points ranking over tournaments matching the filters (`None` matches all).
    pub fn player_rankings(
        &self,
        category: Option<Category>,
        gender: Option<Gender>,
    ) -> Result<Vec<PlayerRanking>, TournamentError> {
        let mut rankings = Vec::new();
        for player in self.storage.all_players()? {
            let tournaments = self.storage.tournaments_with_player(player.id)?;
            if let Some(entry) =
                logic::ranking_entry(&player, &tournaments, category, gender, &self.selector)?
            {
                rankings.push(entry);
            }
        }
        logic::sort_rankings(&mut rankings);
        Ok(rankings)
    }
}
