//! Tournament, TournamentStatus and the bracket error type.

use crate::models::game::{Match, MatchId, Round};
use crate::models::table::TableId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by bracket operations. None of them leave a tournament half-modified.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Fewer than 2 players when building a bracket.
    #[error("Need at least 2 players to start a tournament")]
    InsufficientPlayers,
    /// No tables when building a bracket.
    #[error("No tables available")]
    NoTablesAvailable,
    /// The operation needs an ongoing tournament and there is none.
    #[error("No active tournament")]
    NoActiveTournament,
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    /// The named winner is not one of the match's participants.
    #[error("The winner must be one of the match players: {}", .participants.join(" or "))]
    InvalidWinner {
        match_id: MatchId,
        participants: Vec<String>,
    },
    /// Explicit advance requested while the current round still has open matches.
    #[error("Round {round} still has {open} unresolved match(es)")]
    RoundNotResolved { round: usize, open: usize },
    /// The match belongs to a round that has already been advanced past.
    #[error("Match {0} belongs to a closed round and can no longer be changed")]
    MatchAlreadyDecided(MatchId),
}

/// Identifier of a tournament (`T1`, `T2`, ...).
pub type TournamentId = String;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Bracket not built yet.
    #[default]
    Pending,
    Ongoing,
    /// Terminal; the champion is the winner of the last round's only match.
    Complete,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Pending => write!(f, "pending"),
            TournamentStatus::Ongoing => write!(f, "ongoing"),
            TournamentStatus::Complete => write!(f, "complete"),
        }
    }
}

/// How many players of a round play a real match versus get a bye.
///
/// Chosen once when the bracket is built and applied to every later round of
/// that tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByePolicy {
    /// Grow to the smallest power of two `P >= n` and play `n - P/2` matches, so the
    /// next round has exactly `P/2` entrants and never needs another bye.
    #[default]
    Balanced,
    /// Pair the largest power of two `<= n` players; everyone else gets a bye.
    /// Later odd rounds fall back to the same rule.
    Greedy,
}

impl ByePolicy {
    /// Number of players (always even) that enter two-player matches in a round of `n`.
    pub fn paired_count(self, n: usize) -> usize {
        if n < 2 {
            return 0;
        }
        match self {
            ByePolicy::Balanced => {
                let p = n.next_power_of_two();
                2 * (n - p / 2)
            }
            ByePolicy::Greedy => 1usize << (usize::BITS - 1 - n.leading_zeros()),
        }
    }

    /// Number of players advanced without playing in a round of `n`.
    pub fn bye_count(self, n: usize) -> usize {
        n - self.paired_count(n)
    }
}

impl std::str::FromStr for ByePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(ByePolicy::Balanced),
            "greedy" => Ok(ByePolicy::Greedy),
            other => Err(format!("unknown bye policy '{other}' (expected balanced or greedy)")),
        }
    }
}

/// A single-elimination tournament: status plus the ordered history of rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    #[serde(default, alias = "Status")]
    pub status: TournamentStatus,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub current_round: usize,
    /// Shuffled entry order, kept for audit only.
    #[serde(default, alias = "player_ids")]
    pub players: Vec<String>,
    /// Table ids snapshotted when the bracket was built.
    #[serde(default)]
    pub tables: Vec<TableId>,
    /// Next index handed to the table allocator; never reset between rounds.
    #[serde(default)]
    pub table_cursor: usize,
    #[serde(default)]
    pub match_count: usize,
    #[serde(default)]
    pub bye_policy: ByePolicy,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament in Pending state with no rounds.
    pub fn new(
        id: impl Into<TournamentId>,
        players: Vec<String>,
        tables: Vec<TableId>,
        bye_policy: ByePolicy,
    ) -> Self {
        Self {
            id: id.into(),
            status: TournamentStatus::Pending,
            rounds: Vec::new(),
            current_round: 0,
            players,
            tables,
            table_cursor: 0,
            match_count: 0,
            bye_policy,
            created_at: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == TournamentStatus::Complete
    }

    pub fn current(&self) -> Option<&Round> {
        self.rounds.get(self.current_round)
    }

    /// Champion once Complete: the winner of the last round's only match.
    pub fn champion(&self) -> Option<&str> {
        if !self.is_complete() {
            return None;
        }
        let last = self.rounds.last()?;
        match last.matches.as_slice() {
            [only] => only.winner.as_deref(),
            _ => None,
        }
    }

    /// Position (round index, match index) of a match. The current round is searched
    /// first, then earlier rounds from the most recent back, since records with
    /// per-round numbering reuse ids (`M1` in every round).
    pub fn locate_match(&self, id: &str) -> Option<(usize, usize)> {
        let in_round = |r: usize| {
            self.rounds
                .get(r)?
                .matches
                .iter()
                .position(|m| m.id == id)
                .map(|i| (r, i))
        };
        in_round(self.current_round).or_else(|| (0..self.rounds.len()).rev().find_map(in_round))
    }

    pub fn find_match(&self, id: &str) -> Option<&Match> {
        self.locate_match(id)
            .map(|(r, i)| &self.rounds[r].matches[i])
    }

    /// Allocate the next tournament-wide match id (`M<n>`), skipping ids already in use.
    pub fn next_match_id(&mut self) -> MatchId {
        loop {
            self.match_count += 1;
            let id = format!("M{}", self.match_count);
            if self.locate_match(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_policy_leaves_power_of_two_for_next_round() {
        for n in 2..=40 {
            let paired = ByePolicy::Balanced.paired_count(n);
            let next = paired / 2 + ByePolicy::Balanced.bye_count(n);
            assert!(next.is_power_of_two(), "n={n} next={next}");
            assert_eq!(paired % 2, 0);
        }
        assert_eq!(ByePolicy::Balanced.paired_count(5), 2);
        assert_eq!(ByePolicy::Balanced.bye_count(5), 3);
        assert_eq!(ByePolicy::Balanced.paired_count(8), 8);
    }

    #[test]
    fn greedy_policy_pairs_largest_power_of_two() {
        assert_eq!(ByePolicy::Greedy.paired_count(5), 4);
        assert_eq!(ByePolicy::Greedy.bye_count(5), 1);
        assert_eq!(ByePolicy::Greedy.paired_count(7), 4);
        assert_eq!(ByePolicy::Greedy.paired_count(3), 2);
        assert_eq!(ByePolicy::Greedy.paired_count(16), 16);
    }

    #[test]
    fn no_pairs_below_two_players() {
        assert_eq!(ByePolicy::Balanced.paired_count(1), 0);
        assert_eq!(ByePolicy::Greedy.paired_count(0), 0);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TournamentStatus::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
    }

    #[test]
    fn legacy_tournament_record_loads() {
        let raw = r#"{
            "id": "T1",
            "matches": null,
            "rounds": [{"matches": [
                {"id": "M1", "player1": "a", "player2": "b", "winner": "", "table_id": "table_x"}
            ]}],
            "players": ["a", "b"],
            "Status": "ongoing",
            "current_round": 0
        }"#;
        let t: Tournament = serde_json::from_str(raw).unwrap();
        assert_eq!(t.status, TournamentStatus::Ongoing);
        assert_eq!(t.rounds[0].matches[0].winner, None);
        assert_eq!(t.bye_policy, ByePolicy::Balanced);
    }

    #[test]
    fn reused_match_id_resolves_to_current_round() {
        let mut t = Tournament::new("T1", vec![], vec![], ByePolicy::Balanced);
        t.rounds.push(Round::new(vec![Match::bye("M1", "a"), Match::bye("M2", "b")]));
        t.rounds.push(Round::new(vec![Match::bye("M1", "a")]));
        assert_eq!(t.locate_match("M1"), Some((0, 0)));
        t.current_round = 1;
        assert_eq!(t.locate_match("M1"), Some((1, 0)));
        assert_eq!(t.locate_match("M2"), Some((0, 1)));
        assert_eq!(t.locate_match("M9"), None);
    }

    #[test]
    fn next_match_id_skips_ids_in_use() {
        let mut t = Tournament::new("T1", vec![], vec![], ByePolicy::Balanced);
        t.rounds.push(Round::new(vec![Match::bye("M1", "a")]));
        assert_eq!(t.next_match_id(), "M2");
        assert_eq!(t.next_match_id(), "M3");
    }
}
