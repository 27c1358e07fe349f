//! Bracket construction: shuffle the roster and build round 0.

use crate::logic::tables::TableAllocator;
use crate::models::{
    ByePolicy, Match, MatchId, Round, TableId, Tournament, TournamentError, TournamentStatus,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly shuffle a roster (Fisher-Yates). Pass a seeded rng for reproducible brackets.
pub fn shuffle_players<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = names.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Build tournament `T1` from an already shuffled roster using the default bye policy.
pub fn build_bracket(players: &[String], tables: &[TableId]) -> Result<Tournament, TournamentError> {
    build_bracket_with_policy("T1", players, tables, ByePolicy::default())
}

/// Build a tournament whose round 0 pairs `players` in order.
///
/// Players must be distinct. The first `policy.paired_count(n)` players are paired
/// two by two onto tables; every remaining player gets a bye. Nothing is created
/// when a precondition fails.
pub fn build_bracket_with_policy(
    id: &str,
    players: &[String],
    tables: &[TableId],
    policy: ByePolicy,
) -> Result<Tournament, TournamentError> {
    if players.len() < 2 {
        return Err(TournamentError::InsufficientPlayers);
    }
    let mut alloc = TableAllocator::new(tables)?;

    let mut tournament = Tournament::new(id, players.to_vec(), tables.to_vec(), policy);
    let round = emit_round(players, policy, &mut alloc, &mut || tournament.next_match_id());
    tournament.table_cursor = alloc.cursor();
    tournament.rounds.push(round);
    tournament.current_round = 0;
    tournament.status = TournamentStatus::Ongoing;
    Ok(tournament)
}

/// Two-then-bye emission shared by every round: matches for the paired prefix in
/// order, then one bye per leftover entrant.
pub(crate) fn emit_round(
    entrants: &[String],
    policy: ByePolicy,
    tables: &mut TableAllocator<'_>,
    next_id: &mut dyn FnMut() -> MatchId,
) -> Round {
    let (paired, byes) = entrants.split_at(policy.paired_count(entrants.len()));

    let mut matches: Vec<Match> = paired
        .chunks_exact(2)
        .map(|pair| Match::new(next_id(), &pair[0], &pair[1], tables.allocate()))
        .collect();
    matches.extend(byes.iter().map(|p| Match::bye(next_id(), p)));

    Round::new(matches)
}
