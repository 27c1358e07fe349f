//! Integration tests for recording results and explicit round advancement.

use knockout_tournament::{
    advance_round, build_bracket, current_status, record_result, Progress, Tournament,
    TournamentError,
};

fn four_player_bracket() -> Tournament {
    let players: Vec<String> = ["Alice", "Bob", "Carol", "Dave"].map(String::from).to_vec();
    build_bracket(&players, &["T1".to_string(), "T2".to_string()]).unwrap()
}

#[test]
fn invalid_winner_leaves_state_unchanged() {
    let mut t = four_player_bracket();
    let before = t.clone();
    let err = record_result(&mut t, "M1", "Carol").unwrap_err();
    assert_eq!(
        err,
        TournamentError::InvalidWinner {
            match_id: "M1".into(),
            participants: vec!["Alice".into(), "Bob".into()],
        }
    );
    assert_eq!(err.to_string(), "The winner must be one of the match players: Alice or Bob");
    assert_eq!(t, before);
}

#[test]
fn unknown_match_leaves_state_unchanged() {
    let mut t = four_player_bracket();
    let before = t.clone();
    assert_eq!(
        record_result(&mut t, "M99", "Alice"),
        Err(TournamentError::MatchNotFound("M99".into()))
    );
    assert_eq!(t, before);
}

#[test]
fn winner_is_stored_with_canonical_name() {
    let mut t = four_player_bracket();
    record_result(&mut t, " M1 ", "  bOB ").unwrap();
    assert_eq!(t.rounds[0].matches[0].winner.as_deref(), Some("Bob"));
}

#[test]
fn result_can_be_corrected_until_round_closes() {
    let mut t = four_player_bracket();
    record_result(&mut t, "M1", "Alice").unwrap();
    record_result(&mut t, "M1", "Bob").unwrap();
    assert_eq!(t.rounds[0].matches[0].winner.as_deref(), Some("Bob"));

    record_result(&mut t, "M2", "Dave").unwrap();
    assert_eq!(
        record_result(&mut t, "M1", "Alice"),
        Err(TournamentError::MatchAlreadyDecided("M1".into()))
    );
    assert_eq!(t.rounds[1].matches[0].player1, "Bob");
}

#[test]
fn completed_tournament_rejects_results() {
    let players = vec!["A".to_string(), "B".to_string()];
    let mut t = build_bracket(&players, &["T1".to_string()]).unwrap();
    record_result(&mut t, "M1", "A").unwrap();
    assert_eq!(
        record_result(&mut t, "M1", "B"),
        Err(TournamentError::NoActiveTournament)
    );
    assert_eq!(t.champion(), Some("A"));
}

#[test]
fn bye_accepts_only_its_own_player() {
    let players: Vec<String> = ["A", "B", "C"].map(String::from).to_vec();
    let mut t = build_bracket(&players, &["T1".to_string()]).unwrap();
    // 3 players: M1 = A vs B, M2 = bye for C.
    assert!(t.rounds[0].matches[1].is_bye());
    assert!(matches!(
        record_result(&mut t, "M2", "A"),
        Err(TournamentError::InvalidWinner { .. })
    ));
    assert!(matches!(
        record_result(&mut t, "M2", ""),
        Err(TournamentError::InvalidWinner { .. })
    ));
    assert_eq!(record_result(&mut t, "M2", "c"), Ok(Progress::Waiting));
}

#[test]
fn explicit_advance_requires_resolved_round() {
    let mut t = four_player_bracket();
    record_result(&mut t, "M1", "Alice").unwrap();
    assert_eq!(
        advance_round(&mut t),
        Err(TournamentError::RoundNotResolved { round: 1, open: 1 })
    );
    assert_eq!(t.rounds.len(), 1);
}

#[test]
fn explicit_advance_on_finished_tournament_fails() {
    let players = vec!["A".to_string(), "B".to_string()];
    let mut t = build_bracket(&players, &["T1".to_string()]).unwrap();
    record_result(&mut t, "M1", "B").unwrap();
    assert_eq!(advance_round(&mut t), Err(TournamentError::NoActiveTournament));
}

#[test]
fn status_is_idempotent_and_describes_round() {
    let mut t = four_player_bracket();
    record_result(&mut t, "M1", "Alice").unwrap();
    let first = current_status(&t);
    let second = current_status(&t);
    assert_eq!(first, second);
    assert!(first.contains("Status: ongoing"));
    assert!(first.contains("Current round: 1"));
    assert!(first.contains("- M1: Alice vs Bob (Table: T1) - Winner: Alice"));
    assert!(first.contains("- M2: Carol vs Dave (Table: T2)"));

    record_result(&mut t, "M2", "Carol").unwrap();
    record_result(&mut t, "M3", "Carol").unwrap();
    let done = current_status(&t);
    assert!(done.contains("Status: complete"));
    assert!(done.contains("Current round: 2"));
    assert!(done.contains("Champion: Carol"));
}

fn legacy(rounds: &str, current_round: usize) -> Tournament {
    let raw = format!(
        r#"{{"id": "T1", "rounds": {rounds}, "players": ["a", "b", "c", "d"],
            "Status": "ongoing", "current_round": {current_round}}}"#
    );
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn failed_progression_keeps_previous_winner() {
    let mut t = legacy(
        r#"[{"matches": [
            {"id": "M1", "player1": "a", "player2": "b", "winner": "", "table_id": "x"},
            {"id": "M2", "player1": "c", "player2": "d", "winner": "c", "table_id": "x"}
        ]}]"#,
        0,
    );
    assert!(t.tables.is_empty());
    let before = t.clone();
    assert_eq!(record_result(&mut t, "M1", "a"), Err(TournamentError::NoTablesAvailable));
    assert_eq!(t, before);
}

#[test]
fn per_round_match_ids_resolve_to_current_round() {
    let mut t = legacy(
        r#"[
            {"matches": [
                {"id": "M1", "player1": "a", "player2": "b", "winner": "a", "table_id": "x"},
                {"id": "M2", "player1": "c", "player2": "d", "winner": "c", "table_id": "x"}
            ]},
            {"matches": [
                {"id": "M1", "player1": "a", "player2": "c", "winner": "", "table_id": "x"}
            ]}
        ]"#,
        1,
    );
    assert_eq!(record_result(&mut t, "M1", "C"), Ok(Progress::Completed));
    assert_eq!(t.champion(), Some("c"));
    assert_eq!(t.rounds[0].matches[0].winner.as_deref(), Some("a"));
}
