//! Knockout tournament organizer: library with models, bracket logic and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{ConfigError, ServerConfig};
pub use logic::{
    advance_latest, advance_round, build_bracket, build_bracket_with_policy, current_status,
    describe_match, latest_status, next_table, record_latest_result, record_result,
    shuffle_players, start_tournament, try_advance, Progress, TableAllocator,
};
pub use models::{
    ByePolicy, Database, Match, MatchId, Player, PlayerId, RegistryError, Round, Table, TableId,
    Tournament, TournamentError, TournamentId, TournamentStatus,
};
pub use store::{Store, StoreError};
