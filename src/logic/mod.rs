//! Bracket logic: table allocation, bracket building, results and advancement.

mod advance;
mod bracket;
mod lifecycle;
mod results;
mod status;
mod tables;

pub use advance::{advance_round, try_advance, Progress};
pub use bracket::{build_bracket, build_bracket_with_policy, shuffle_players};
pub use lifecycle::{advance_latest, latest_status, record_latest_result, start_tournament};
pub use results::record_result;
pub use status::{current_status, describe_match};
pub use tables::{next_table, TableAllocator};
