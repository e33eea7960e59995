//! Integration tests for the id-based service over in-memory storage.

use chrono::Utc;
use doubles_tournament_web::{
    Category, ErrorKind, Gender, InMemoryStorage, NewPair, NewPlayer, NewTournament, Pair,
    PairUpdate, Player, PlayerUpdate, StrategySelector, Storage, Tournament, TournamentError,
    TournamentFormat, TournamentService, TournamentStatus, TournamentUpdate, WinningMatchRule,
    MAX_GAMES_PER_SIDE,
};
use std::sync::Arc;
use std::thread;

fn service() -> TournamentService<InMemoryStorage> {
    TournamentService::new(InMemoryStorage::new(), StrategySelector::new())
}

fn player(svc: &TournamentService<InMemoryStorage>, name: &str, dni: &str) -> Player {
    svc.create_player(NewPlayer {
        name: name.to_string(),
        last_name: "Test".to_string(),
        gender: Gender::Male,
        dni: dni.to_string(),
        phone_number: "1155550000".to_string(),
    })
    .unwrap()
}

fn pair(svc: &TournamentService<InMemoryStorage>, n: usize) -> Pair {
    let a = player(svc, &format!("P{n}a"), &format!("{n:08}1"));
    let b = player(svc, &format!("P{n}b"), &format!("{n:08}2"));
    svc.create_pair(NewPair {
        player1: a.id,
        player2: b.id,
        team_name: format!("Team {n}"),
    })
    .unwrap()
}

fn new_tournament(name: &str) -> NewTournament {
    NewTournament {
        name: name.to_string(),
        start_date: Utc::now(),
        address: None,
        format: TournamentFormat::Quadrangular,
        winning_match_rule: WinningMatchRule::BestOfThreeSets,
        category: Category::Sixth,
        gender: Gender::Male,
    }
}

/// A created tournament with four entered pairs.
fn ready_tournament(svc: &TournamentService<InMemoryStorage>, name: &str) -> Tournament {
    let t = svc.create_tournament(new_tournament(name)).unwrap();
    for n in 0..4 {
        let p = pair(svc, n + name.len() * 10);
        svc.add_pair_to_tournament(t.id, p.id).unwrap();
    }
    svc.get_tournament(t.id).unwrap()
}

#[test]
fn duplicate_tournament_name_is_rejected() {
    let svc = service();
    svc.create_tournament(new_tournament("Open")).unwrap();
    let err = svc.create_tournament(new_tournament("open")).unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateTournamentName(_)));
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn new_tournament_is_created_without_matches() {
    let svc = service();
    let t = svc.create_tournament(new_tournament("Open")).unwrap();
    assert_eq!(t.status, TournamentStatus::Created);
    assert!(t.matches.is_empty());
    assert!(svc.storage().tournament_exists(t.id).unwrap());
}

#[test]
fn roster_rules() {
    let svc = service();
    let a = player(&svc, "Ana", "30111222");
    let dup = svc
        .create_player(NewPlayer {
            name: "Other".to_string(),
            last_name: "Person".to_string(),
            gender: Gender::Female,
            dni: "30111222".to_string(),
            phone_number: "1155551111".to_string(),
        })
        .unwrap_err();
    assert!(matches!(dup, TournamentError::DuplicateDni(_)));

    let same = svc
        .create_pair(NewPair {
            player1: a.id,
            player2: a.id,
            team_name: "Solo".to_string(),
        })
        .unwrap_err();
    assert!(matches!(same, TournamentError::SamePlayerTwice(_)));

    let ghost = uuid::Uuid::new_v4();
    let missing = svc
        .create_pair(NewPair {
            player1: a.id,
            player2: ghost,
            team_name: "Ghosts".to_string(),
        })
        .unwrap_err();
    assert!(matches!(missing, TournamentError::PlayerNotFound(id) if id == ghost));

    let first = pair(&svc, 1);
    let renamed = svc
        .create_pair(NewPair {
            player1: first.player1,
            player2: a.id,
            team_name: "team 1".to_string(),
        })
        .unwrap_err();
    assert!(matches!(renamed, TournamentError::DuplicateTeamName(_)));

    assert_eq!(svc.pairs_of_player(first.player1).unwrap(), vec![first]);
}

#[test]
fn tournament_roster_changes_only_before_start() {
    let svc = service();
    let t = ready_tournament(&svc, "Winter");
    let extra = pair(&svc, 99);

    let err = svc.add_pair_to_tournament(t.id, t.pairs[0].id).unwrap_err();
    assert!(matches!(err, TournamentError::PairAlreadyEntered(_)));
    let err = svc.remove_pair_from_tournament(t.id, extra.id).unwrap_err();
    assert!(matches!(err, TournamentError::PairNotInTournament(_)));
    let err = svc.add_pair_to_tournament(t.id, uuid::Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    svc.start(t.id).unwrap();
    let err = svc.add_pair_to_tournament(t.id, extra.id).unwrap_err();
    assert!(matches!(err, TournamentError::NotEditable { status: TournamentStatus::InProgress }));
    let err = svc.remove_pair_from_tournament(t.id, t.pairs[0].id).unwrap_err();
    assert!(matches!(err, TournamentError::NotEditable { .. }));
    assert_eq!(svc.pairs_in_tournament(t.id).unwrap().len(), 4);
}

#[test]
fn start_with_three_pairs_fails_and_is_not_persisted() {
    let svc = service();
    let t = ready_tournament(&svc, "Short");
    svc.remove_pair_from_tournament(t.id, t.pairs[3].id).unwrap();

    let err = svc.start(t.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    let stored = svc.get_tournament(t.id).unwrap();
    assert_eq!(stored.status, TournamentStatus::Created);
    assert!(stored.matches.is_empty());
}

#[test]
fn unknown_tournament_is_not_found() {
    let svc = service();
    let id = uuid::Uuid::new_v4();
    assert!(matches!(svc.start(id), Err(TournamentError::TournamentNotFound(x)) if x == id));
    assert!(matches!(svc.standings(id), Err(TournamentError::TournamentNotFound(_))));
    assert!(matches!(svc.delete_tournament(id), Err(TournamentError::TournamentNotFound(_))));
}

#[test]
fn recording_the_last_result_finishes_the_tournament() {
    let svc = service();
    let t = ready_tournament(&svc, "Summer");
    let t = svc.start(t.id).unwrap();
    assert_eq!(svc.progress(t.id).unwrap().percentage, 0.0);

    let ids: Vec<_> = t.matches.iter().map(|m| m.id).collect();
    for (i, id) in ids.iter().enumerate() {
        let updated = svc.record_result(t.id, *id, 6, i as u32).unwrap();
        let expected = if i + 1 == ids.len() {
            TournamentStatus::Finished
        } else {
            TournamentStatus::InProgress
        };
        assert_eq!(updated.status, expected);
    }

    let done = svc.get_tournament(t.id).unwrap();
    assert!(done.end_date.is_some());
    let progress = svc.progress(t.id).unwrap();
    assert_eq!(progress.completed_matches, 6);
    assert_eq!(progress.percentage, 100.0);

    let err = svc.record_result(t.id, ids[0], 0, 6).unwrap_err();
    assert!(matches!(err, TournamentError::NotEditable { status: TournamentStatus::Finished }));
    let err = svc.update_status(t.id, TournamentStatus::InProgress).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
}

#[test]
fn result_recording_rules() {
    let svc = service();
    let t = ready_tournament(&svc, "Spring");
    let err = svc.record_result(t.id, uuid::Uuid::new_v4(), 6, 0).unwrap_err();
    assert!(matches!(err, TournamentError::NotEditable { status: TournamentStatus::Created }));

    let t = svc.start(t.id).unwrap();
    let err = svc.record_result(t.id, uuid::Uuid::new_v4(), 6, 0).unwrap_err();
    assert!(matches!(err, TournamentError::MatchNotFound(_)));

    // A second result for the same match replaces the first.
    let m = t.matches[0].id;
    svc.record_result(t.id, m, 6, 0).unwrap();
    let updated = svc.record_result(t.id, m, 2, 6).unwrap();
    let recorded = updated.matches.iter().find(|x| x.id == m).unwrap();
    assert_eq!(recorded.score(), Some((2, 6)));
}

#[test]
fn explicit_finalize_and_try_finalize() {
    let svc = service();
    let t = ready_tournament(&svc, "Autumn");
    let t = svc.start(t.id).unwrap();

    let err = svc.finalize(t.id).unwrap_err();
    assert!(matches!(err, TournamentError::IncompleteResults { completed: 0, total: 6 }));
    let unchanged = svc.try_finalize(t.id).unwrap();
    assert_eq!(unchanged.status, TournamentStatus::InProgress);

    let err = svc.update_status(t.id, TournamentStatus::Finished).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(svc.get_tournament(t.id).unwrap().status, TournamentStatus::InProgress);
}

#[test]
fn standings_through_the_service() {
    let svc = service();
    let t = ready_tournament(&svc, "League");
    let t = svc.start(t.id).unwrap();
    let first = t.matches[0].clone();
    svc.record_result(t.id, first.id, 6, 1).unwrap();

    let standings = svc.standings(t.id).unwrap();
    assert_eq!(standings.len(), 4);
    assert_eq!(standings[0].pair.id, first.pair1);
    assert_eq!(standings[0].points, 10);
    assert_eq!(standings[3].pair.id, first.pair2);
}

#[test]
fn update_and_summary() {
    let svc = service();
    svc.create_tournament(new_tournament("Taken")).unwrap();
    let t = ready_tournament(&svc, "Cup");

    let err = svc
        .update_tournament(
            t.id,
            TournamentUpdate {
                name: Some("TAKEN".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateTournamentName(_)));

    let updated = svc
        .update_tournament(
            t.id,
            TournamentUpdate {
                name: Some("Cup".to_string()),
                address: Some("Main club".to_string()),
                format: Some(TournamentFormat::RoundRobin),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.address.as_deref(), Some("Main club"));
    assert_eq!(updated.format, TournamentFormat::RoundRobin);

    svc.start(t.id).unwrap();
    let err = svc
        .update_tournament(
            t.id,
            TournamentUpdate {
                format: Some(TournamentFormat::Quadrangular),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, TournamentError::NotEditable { .. }));

    let summaries = svc.summaries().unwrap();
    let cup = summaries.iter().find(|s| s.id == t.id).unwrap();
    assert_eq!((cup.pair_count, cup.match_count), (4, 6));
    assert_eq!(cup.status, TournamentStatus::InProgress);

    svc.delete_tournament(t.id).unwrap();
    assert_eq!(svc.list_tournaments().unwrap().len(), 1);
}

#[test]
fn concurrent_creates_with_one_name_keep_one_tournament() {
    let svc = Arc::new(service());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || svc.create_tournament(new_tournament("Race Cup")))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, TournamentError::DuplicateTournamentName(_))));
    assert_eq!(svc.list_tournaments().unwrap().len(), 1);
}

#[test]
fn out_of_range_score_is_rejected_and_not_stored() {
    let svc = service();
    let t = ready_tournament(&svc, "Open");
    let t = svc.start(t.id).unwrap();
    let m = t.matches[0].id;

    let err = svc.record_result(t.id, m, MAX_GAMES_PER_SIDE + 1, 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(svc.progress(t.id).unwrap().completed_matches, 0);
}

#[test]
fn player_update_and_delete() {
    let svc = service();
    let p = player(&svc, "Ana", "30111222");
    let updated = svc
        .update_player(
            p.id,
            PlayerUpdate {
                last_name: Some(" Gomez ".to_string()),
                phone_number: Some("1166667777".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Ana");
    assert_eq!(updated.last_name, "Gomez");
    assert_eq!(updated.phone_number, "1166667777");
    assert_eq!(updated.dni, "30111222");
    assert_eq!(svc.get_player(p.id).unwrap(), updated);

    let paired = pair(&svc, 7);
    let err = svc.delete_player(paired.player1).unwrap_err();
    assert!(matches!(err, TournamentError::PlayerHasPairs(id) if id == paired.player1));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    svc.delete_player(p.id).unwrap();
    assert!(matches!(svc.get_player(p.id), Err(TournamentError::PlayerNotFound(_))));
    assert_eq!(svc.delete_player(p.id).unwrap_err().kind(), ErrorKind::NotFound);
    let err = svc.update_player(p.id, PlayerUpdate::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn pair_update_and_delete_only_outside_tournaments() {
    let svc = service();
    let first = pair(&svc, 1);
    let second = pair(&svc, 2);
    let spare = player(&svc, "Spare", "40000000");

    let updated = svc
        .update_pair(
            first.id,
            PairUpdate {
                player1: first.player1,
                player2: spare.id,
                team_name: "Team One".to_string(),
            },
        )
        .unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.player2, spare.id);
    assert_eq!(svc.get_pair(first.id).unwrap(), updated);

    let clash = svc
        .update_pair(
            first.id,
            PairUpdate {
                player1: first.player1,
                player2: spare.id,
                team_name: "team 2".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(clash, TournamentError::DuplicateTeamName(_)));
    let same = svc
        .update_pair(
            first.id,
            PairUpdate {
                player1: spare.id,
                player2: spare.id,
                team_name: "Team One".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(same, TournamentError::SamePlayerTwice(_)));

    let t = svc.create_tournament(new_tournament("Members Cup")).unwrap();
    svc.add_pair_to_tournament(t.id, second.id).unwrap();
    let err = svc
        .update_pair(
            second.id,
            PairUpdate {
                player1: second.player1,
                player2: second.player2,
                team_name: "Renamed".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, TournamentError::PairInTournament { tournament, .. } if tournament == t.id));
    assert!(matches!(
        svc.delete_pair(second.id),
        Err(TournamentError::PairInTournament { .. })
    ));

    svc.remove_pair_from_tournament(t.id, second.id).unwrap();
    svc.delete_pair(second.id).unwrap();
    assert!(matches!(svc.get_pair(second.id), Err(TournamentError::PairNotFound(_))));
    assert_eq!(svc.list_pairs().unwrap(), vec![updated]);
}
