//! Recording match results.

use crate::logic::advance::{try_advance, Progress};
use crate::models::{Tournament, TournamentError, TournamentStatus};

/// Record `winner` for match `match_id`, then run the progression check.
///
/// The winner is matched against both participants ignoring case and surrounding
/// whitespace; the stored participant name is what gets recorded. Results in the
/// current round may be corrected until the round closes. On error the tournament
/// is left untouched.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: &str,
    winner: &str,
) -> Result<Progress, TournamentError> {
    if tournament.status != TournamentStatus::Ongoing {
        return Err(TournamentError::NoActiveTournament);
    }
    let match_id = match_id.trim();
    let (round_idx, match_idx) = tournament
        .locate_match(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if round_idx != tournament.current_round {
        return Err(TournamentError::MatchAlreadyDecided(match_id.to_string()));
    }

    let game = &mut tournament.rounds[round_idx].matches[match_idx];
    let canonical = game
        .participant_named(winner)
        .map(str::to_string)
        .ok_or_else(|| TournamentError::InvalidWinner {
            match_id: game.id.clone(),
            participants: std::iter::once(game.player1.clone())
                .chain(game.player2.clone())
                .collect(),
        })?;
    let previous = game.winner.replace(canonical);

    // A failed progression check must not keep the new winner.
    let progress = try_advance(tournament);
    if progress.is_err() {
        tournament.rounds[round_idx].matches[match_idx].winner = previous;
    }
    progress
}
