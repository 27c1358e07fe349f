//! Match and Round: the building blocks of a bracket.

use crate::models::table::TableId;
use serde::{Deserialize, Serialize};

/// Identifier of a match, unique within one tournament (`M1`, `M2`, ...).
pub type MatchId = String;

/// A single pairing. `player2 == None` marks a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub player1: String,
    #[serde(default, with = "blank")]
    pub player2: Option<String>,
    /// None until resolved; a bye is resolved at creation.
    #[serde(default, with = "blank")]
    pub winner: Option<String>,
    #[serde(default, with = "blank")]
    pub table_id: Option<TableId>,
    /// Match of the next round this winner was paired into.
    #[serde(default, with = "blank")]
    pub next_match: Option<MatchId>,
}

impl Match {
    /// A two-player match on the given table.
    pub fn new(
        id: impl Into<MatchId>,
        player1: impl Into<String>,
        player2: impl Into<String>,
        table_id: TableId,
    ) -> Self {
        Self {
            id: id.into(),
            player1: player1.into(),
            player2: Some(player2.into()),
            winner: None,
            table_id: Some(table_id),
            next_match: None,
        }
    }

    /// A bye: the sole participant is the winner and no table is used.
    pub fn bye(id: impl Into<MatchId>, player: impl Into<String>) -> Self {
        let player = player.into();
        Self {
            id: id.into(),
            winner: Some(player.clone()),
            player1: player,
            player2: None,
            table_id: None,
            next_match: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player2.is_none()
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    /// The stored participant name matching `name` after trimming and lowercasing.
    pub fn participant_named(&self, name: &str) -> Option<&str> {
        let wanted = normalize(name);
        std::iter::once(self.player1.as_str())
            .chain(self.player2.as_deref())
            .find(|p| normalize(p) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One layer of the bracket. Match order decides next-round pairing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub fn is_resolved(&self) -> bool {
        self.matches.iter().all(Match::is_resolved)
    }

    /// Winners in match order; None while any match is still open.
    pub fn winners(&self) -> Option<Vec<String>> {
        self.matches.iter().map(|m| m.winner.clone()).collect()
    }
}

/// Optional strings persisted as `""` when absent; `""`, null and a missing key all read as None.
mod blank {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}
