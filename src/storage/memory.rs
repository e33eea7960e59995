//! In-memory storage: one `RwLock` around all tables.

use super::{Storage, StorageError, TournamentMutation};
use crate::models::{Pair, PairId, Player, PlayerId, Tournament, TournamentError, TournamentId};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    tournaments: HashMap<TournamentId, Tournament>,
    players: HashMap<PlayerId, Player>,
    pairs: HashMap<PairId, Pair>,
}

/// Process-local storage. Lists are returned sorted by name for stable output.
#[derive(Default)]
pub struct InMemoryStorage {
    tables: RwLock<Tables>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables.write().map_err(|_| StorageError::LockPoisoned)
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl Tables {
    fn tournament_name_taken(&self, name: &str, except: Option<TournamentId>) -> bool {
        self.tournaments
            .values()
            .any(|t| Some(t.id) != except && same_name(&t.name, name))
    }

    fn dni_taken(&self, dni: &str, except: Option<PlayerId>) -> bool {
        self.players
            .values()
            .any(|p| Some(p.id) != except && same_name(&p.dni, dni))
    }

    fn team_name_taken(&self, team_name: &str, except: Option<PairId>) -> bool {
        self.pairs
            .values()
            .any(|p| Some(p.id) != except && same_name(&p.team_name, team_name))
    }

    fn check_new_pair(&self, pair: &Pair, except: Option<PairId>) -> Result<(), TournamentError> {
        if let Some(missing) = pair
            .players()
            .into_iter()
            .find(|id| !self.players.contains_key(id))
        {
            return Err(TournamentError::PlayerNotFound(missing));
        }
        if self.team_name_taken(&pair.team_name, except) {
            return Err(TournamentError::DuplicateTeamName(pair.team_name.clone()));
        }
        Ok(())
    }

    /// Fails if the pair exists nowhere, or is entered in some tournament.
    fn check_pair_free(&self, id: PairId) -> Result<(), TournamentError> {
        if !self.pairs.contains_key(&id) {
            return Err(TournamentError::PairNotFound(id));
        }
        match self.tournaments.values().find(|t| t.pair(id).is_some()) {
            Some(t) => Err(TournamentError::PairInTournament {
                pair: id,
                tournament: t.id,
            }),
            None => Ok(()),
        }
    }
}

impl Storage for InMemoryStorage {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError> {
        Ok(self.read()?.tournaments.get(&id).cloned())
    }

    fn all_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        let mut all: Vec<Tournament> = self.read()?.tournaments.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn insert_tournament(&self, tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut tables = self.write()?;
        if tables.tournament_name_taken(&tournament.name, None) {
            return Err(TournamentError::DuplicateTournamentName(tournament.name));
        }
        tables.tournaments.insert(tournament.id, tournament.clone());
        Ok(tournament)
    }

    fn delete_tournament(&self, id: TournamentId) -> Result<bool, StorageError> {
        Ok(self.write()?.tournaments.remove(&id).is_some())
    }

    fn tournament_exists(&self, id: TournamentId) -> Result<bool, StorageError> {
        Ok(self.read()?.tournaments.contains_key(&id))
    }

    fn tournaments_with_player(&self, player_id: PlayerId) -> Result<Vec<Tournament>, StorageError> {
        let mut found: Vec<Tournament> = self
            .read()?
            .tournaments
            .values()
            .filter(|t| t.has_player(player_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.name.cmp(&b.name)));
        Ok(found)
    }

    fn update_tournament(
        &self,
        id: TournamentId,
        apply: TournamentMutation<'_>,
    ) -> Result<Tournament, TournamentError> {
        let mut tables = self.write()?;
        let stored = tables
            .tournaments
            .get(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        // Mutate a copy so a failed mutation leaves the stored record untouched.
        let mut working = stored.clone();
        apply(&mut working)?;
        if tables.tournament_name_taken(&working.name, Some(id)) {
            return Err(TournamentError::DuplicateTournamentName(working.name));
        }
        tables.tournaments.insert(id, working.clone());
        log::debug!("Committed tournament {} ({})", id, working.status);
        Ok(working)
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        Ok(self.read()?.players.get(&id).cloned())
    }

    fn all_players(&self) -> Result<Vec<Player>, StorageError> {
        let mut all: Vec<Player> = self.read()?.players.values().cloned().collect();
        all.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }

    fn insert_player(&self, player: Player) -> Result<Player, TournamentError> {
        let mut tables = self.write()?;
        if tables.dni_taken(&player.dni, None) {
            return Err(TournamentError::DuplicateDni(player.dni));
        }
        tables.players.insert(player.id, player.clone());
        Ok(player)
    }

    fn replace_player(&self, player: Player) -> Result<Player, TournamentError> {
        let mut tables = self.write()?;
        if !tables.players.contains_key(&player.id) {
            return Err(TournamentError::PlayerNotFound(player.id));
        }
        if tables.dni_taken(&player.dni, Some(player.id)) {
            return Err(TournamentError::DuplicateDni(player.dni));
        }
        tables.players.insert(player.id, player.clone());
        Ok(player)
    }

    fn delete_player(&self, id: PlayerId) -> Result<(), TournamentError> {
        let mut tables = self.write()?;
        if !tables.players.contains_key(&id) {
            return Err(TournamentError::PlayerNotFound(id));
        }
        if tables.pairs.values().any(|p| p.contains(id)) {
            return Err(TournamentError::PlayerHasPairs(id));
        }
        tables.players.remove(&id);
        Ok(())
    }

    fn find_pair(&self, id: PairId) -> Result<Option<Pair>, StorageError> {
        Ok(self.read()?.pairs.get(&id).cloned())
    }

    fn all_pairs(&self) -> Result<Vec<Pair>, StorageError> {
        let mut all: Vec<Pair> = self.read()?.pairs.values().cloned().collect();
        all.sort_by(|a, b| a.team_name.cmp(&b.team_name));
        Ok(all)
    }

    fn insert_pair(&self, pair: Pair) -> Result<Pair, TournamentError> {
        let mut tables = self.write()?;
        tables.check_new_pair(&pair, None)?;
        tables.pairs.insert(pair.id, pair.clone());
        Ok(pair)
    }

    fn replace_pair(&self, pair: Pair) -> Result<Pair, TournamentError> {
        let mut tables = self.write()?;
        tables.check_pair_free(pair.id)?;
        tables.check_new_pair(&pair, Some(pair.id))?;
        tables.pairs.insert(pair.id, pair.clone());
        Ok(pair)
    }

    fn delete_pair(&self, id: PairId) -> Result<(), TournamentError> {
        let mut tables = self.write()?;
        tables.check_pair_free(id)?;
        tables.pairs.remove(&id);
        Ok(())
    }

    fn pairs_with_player(&self, player_id: PlayerId) -> Result<Vec<Pair>, StorageError> {
        let mut found: Vec<Pair> = self
            .read()?
            .pairs
            .values()
            .filter(|p| p.contains(player_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.team_name.cmp(&b.team_name));
        Ok(found)
    }
}
