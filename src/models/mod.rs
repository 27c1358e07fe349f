//! Data structures for knockout tournaments: players, tables, matches, rounds, tournaments.

mod database;
mod game;
mod player;
mod table;
mod tournament;

pub use database::{Database, RegistryError};
pub use game::{Match, MatchId, Round};
pub use player::{Player, PlayerId};
pub use table::{Table, TableId};
pub use tournament::{ByePolicy, Tournament, TournamentError, TournamentId, TournamentStatus};
