//! Human-readable tournament summary for any presentation layer.

use crate::models::{Match, Tournament};
use std::fmt::Write;

/// Summary of the tournament's current round: status, round number (1-based), and
/// each match's pairing with its table and winner when known. Pure formatting.
pub fn current_status(tournament: &Tournament) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tournament {}", tournament.id);
    let _ = writeln!(out, "Status: {}", tournament.status);
    let _ = writeln!(out, "Current round: {}", tournament.current_round + 1);

    if let Some(round) = tournament.current() {
        out.push_str("\nMatches:\n");
        for m in &round.matches {
            let _ = writeln!(out, "- {}", describe_match(m));
        }
    }
    if let Some(champion) = tournament.champion() {
        let _ = writeln!(out, "\nChampion: {champion}");
    }
    out
}

/// One line for a match, e.g. `M1: Alice vs Bob (Table: T1) - Winner: Alice`.
pub fn describe_match(m: &Match) -> String {
    let mut line = match &m.player2 {
        Some(p2) => format!("{}: {} vs {}", m.id, m.player1, p2),
        None => format!("{}: {} advances automatically (bye)", m.id, m.player1),
    };
    if let Some(table) = &m.table_id {
        let _ = write!(line, " (Table: {table})");
    }
    if let (Some(winner), false) = (&m.winner, m.is_bye()) {
        let _ = write!(line, " - Winner: {winner}");
    }
    line
}
