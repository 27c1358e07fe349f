//! Tournament operations against the whole database: start a tournament from the
//! roster and act on the latest one.

use crate::logic::advance::{advance_round, Progress};
use crate::logic::bracket::{build_bracket_with_policy, shuffle_players};
use crate::logic::results::record_result;
use crate::logic::status::current_status;
use crate::models::{ByePolicy, Database, TableId, Tournament, TournamentError};
use rand::Rng;

/// Shuffle the roster, build a bracket over every registered table and append it as
/// the latest tournament.
pub fn start_tournament<'a, R: Rng + ?Sized>(
    db: &'a mut Database,
    policy: ByePolicy,
    rng: &mut R,
) -> Result<&'a Tournament, TournamentError> {
    let players = shuffle_players(&db.player_names(), rng);
    let tables: Vec<_> = db.tables.iter().map(|t| t.id.clone()).collect();
    let tournament = build_bracket_with_policy(&db.next_tournament_id(), &players, &tables, policy)?;
    db.tournaments.push(tournament);
    Ok(&db.tournaments[db.tournaments.len() - 1])
}

/// Latest tournament, with its table snapshot taken from the registry when it has
/// none (records saved before tournaments kept their own table list).
fn latest_with_tables(db: &mut Database) -> Result<&mut Tournament, TournamentError> {
    let registry: Vec<TableId> = db.tables.iter().map(|t| t.id.clone()).collect();
    let tournament = db
        .latest_tournament_mut()
        .ok_or(TournamentError::NoActiveTournament)?;
    if tournament.tables.is_empty() {
        tournament.tables = registry;
    }
    Ok(tournament)
}

/// Record a result on the latest tournament.
pub fn record_latest_result(
    db: &mut Database,
    match_id: &str,
    winner: &str,
) -> Result<Progress, TournamentError> {
    record_result(latest_with_tables(db)?, match_id, winner)
}

/// Explicitly advance the latest tournament.
pub fn advance_latest(db: &mut Database) -> Result<Progress, TournamentError> {
    advance_round(latest_with_tables(db)?)
}

/// Status text of the latest tournament.
pub fn latest_status(db: &Database) -> String {
    match db.latest_tournament() {
        Some(t) => current_status(t),
        None => "No tournament in progress.".to_string(),
    }
}
