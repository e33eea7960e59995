//! Tournament status state machine: Created → InProgress → Finished.
//!
//! | From       | To         | Guard                                   |
//! |------------|------------|-----------------------------------------|
//! | Created    | InProgress | strategy `validate_before_start` passes |
//! | InProgress | Finished   | every match completed                   |
//! | Finished   | -          | terminal                                |
//!
//! Every other move fails with `InvalidTransition`.

use crate::logic::selector::StrategySelector;
use crate::models::{Tournament, TournamentError, TournamentStatus};
use chrono::Utc;

/// The single place that declares which status changes are legal.
pub fn check_transition(from: TournamentStatus, to: TournamentStatus) -> Result<(), TournamentError> {
    use TournamentStatus::*;
    match (from, to) {
        (Created, InProgress) | (InProgress, Finished) => Ok(()),
        _ => Err(TournamentError::InvalidTransition { from, to }),
    }
}

/// Start the tournament: Created → InProgress, generating the schedule if there is none yet.
pub fn start_tournament(
    tournament: &mut Tournament,
    selector: &StrategySelector,
) -> Result<(), TournamentError> {
    update_status(tournament, TournamentStatus::InProgress, selector)
}

/// Move to `new_status` if the transition table and its guard allow it.
///
/// Entering InProgress validates the format and generates matches (only when the
/// match list is empty). Entering Finished requires every match to be completed
/// and stamps `end_date`.
pub fn update_status(
    tournament: &mut Tournament,
    new_status: TournamentStatus,
    selector: &StrategySelector,
) -> Result<(), TournamentError> {
    check_transition(tournament.status, new_status)?;
    match new_status {
        TournamentStatus::InProgress => begin(tournament, selector),
        TournamentStatus::Finished => finish_if_complete(tournament),
        // check_transition rejects every move into Created.
        TournamentStatus::Created => Ok(()),
    }
}

/// Finish if the tournament is in progress and every match has a result.
///
/// Never fails: returns whether the tournament was finished by this call.
pub fn try_finalize(tournament: &mut Tournament) -> bool {
    if tournament.status != TournamentStatus::InProgress
        || tournament.matches.is_empty()
        || !tournament.all_matches_completed()
    {
        return false;
    }
    finish(tournament);
    true
}

/// Finish the tournament, failing if any match is still pending.
///
/// An already finished tournament is returned unchanged.
pub fn finalize(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status == TournamentStatus::Finished {
        return Ok(());
    }
    check_transition(tournament.status, TournamentStatus::Finished)?;
    finish_if_complete(tournament)
}

fn begin(tournament: &mut Tournament, selector: &StrategySelector) -> Result<(), TournamentError> {
    let strategy = selector.get_strategy(tournament.format)?;
    strategy.validate_before_start(tournament)?;
    if tournament.matches.is_empty() {
        let matches = strategy.generate_matches(tournament);
        log::info!(
            "Tournament {} ({}) started with {} pairs, {} matches generated",
            tournament.id,
            tournament.format,
            tournament.pairs.len(),
            matches.len()
        );
        tournament.matches.extend(matches);
    }
    tournament.status = TournamentStatus::InProgress;
    Ok(())
}

fn finish_if_complete(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.all_matches_completed() {
        return Err(TournamentError::IncompleteResults {
            completed: tournament.completed_matches(),
            total: tournament.matches.len(),
        });
    }
    finish(tournament);
    Ok(())
}

fn finish(tournament: &mut Tournament) {
    tournament.status = TournamentStatus::Finished;
    tournament.end_date = Some(Utc::now());
    log::info!("Tournament {} finished", tournament.id);
}
