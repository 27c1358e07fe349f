//! Round advancement (round-barrier model).
//!
//! A round closes only when every one of its matches has a winner. Its winners, in
//! match order, become the entrants of the next round, built with the same
//! two-then-bye rule and bye policy as round 0. A single remaining winner ends the
//! tournament.

use crate::logic::bracket::emit_round;
use crate::logic::tables::TableAllocator;
use crate::models::{Tournament, TournamentError, TournamentStatus};

/// What a progression check did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Progress {
    /// The current round still has open matches.
    Waiting,
    /// A new round was created; holds its index.
    Advanced(usize),
    /// The tournament is now Complete.
    Completed,
}

/// Progression check run after every recorded result: advance (or complete) the
/// tournament if the current round is fully resolved, otherwise do nothing.
pub fn try_advance(tournament: &mut Tournament) -> Result<Progress, TournamentError> {
    if tournament.status != TournamentStatus::Ongoing {
        return Err(TournamentError::NoActiveTournament);
    }
    let Some(winners) = tournament.current().and_then(|r| r.winners()) else {
        return Ok(Progress::Waiting);
    };

    if winners.len() <= 1 {
        tournament.status = TournamentStatus::Complete;
        return Ok(Progress::Completed);
    }

    // Snapshot so the allocator does not borrow the tournament it updates.
    let tables = tournament.tables.clone();
    let mut alloc = TableAllocator::starting_at(&tables, tournament.table_cursor)?;
    let policy = tournament.bye_policy;
    let next = emit_round(&winners, policy, &mut alloc, &mut || tournament.next_match_id());
    tournament.table_cursor = alloc.cursor();

    // Every entrant of the new round appears in exactly one of its matches, in order.
    let feeds = next.matches.iter().flat_map(|m| {
        let slots = if m.is_bye() { 1 } else { 2 };
        std::iter::repeat(m.id.clone()).take(slots)
    });
    let current = tournament.current_round;
    for (source, target) in tournament.rounds[current].matches.iter_mut().zip(feeds) {
        source.next_match = Some(target);
    }

    tournament.rounds.push(next);
    tournament.current_round += 1;
    Ok(Progress::Advanced(tournament.current_round))
}

/// Explicit advance request: fails with `RoundNotResolved` while matches are open.
pub fn advance_round(tournament: &mut Tournament) -> Result<Progress, TournamentError> {
    if tournament.status != TournamentStatus::Ongoing {
        return Err(TournamentError::NoActiveTournament);
    }
    let open = tournament
        .current()
        .map(|r| r.matches.iter().filter(|m| !m.is_resolved()).count())
        .unwrap_or(0);
    if open > 0 {
        return Err(TournamentError::RoundNotResolved {
            round: tournament.current_round + 1,
            open,
        });
    }
    try_advance(tournament)
}
