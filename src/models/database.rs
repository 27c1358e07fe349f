//! Database: the roster, the table pool and every tournament, as persisted to disk.

use crate::models::player::Player;
use crate::models::table::Table;
use crate::models::tournament::Tournament;
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

/// Errors from roster and table management.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    /// Names are unique, case-insensitive.
    #[error("Player {0} already exists")]
    DuplicatePlayer(String),
    #[error("Player {0} not found")]
    PlayerNotFound(String),
    #[error("Cannot remove {requested} table(s): only {available} registered")]
    NotEnoughTables { requested: usize, available: usize },
    #[error("Invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Everything the application keeps between commands.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

impl Database {
    /// Register a player. The name is trimmed before storing.
    pub fn add_player(&mut self, name: &str) -> Result<&Player, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyPlayerName);
        }
        if self.players.iter().any(|p| p.has_name(name)) {
            return Err(RegistryError::DuplicatePlayer(name.to_string()));
        }
        self.players.push(Player::new(name));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Remove a player by name. Remaining players keep their order.
    pub fn remove_player(&mut self, name: &str) -> Result<Player, RegistryError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.has_name(name))
            .ok_or_else(|| RegistryError::PlayerNotFound(name.trim().to_string()))?;
        Ok(self.players.remove(idx))
    }

    /// Numbered roster listing, one player per line.
    pub fn list_players(&self) -> String {
        if self.players.is_empty() {
            return "No players".to_string();
        }
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {}\n", i + 1, p.name))
            .collect()
    }

    /// Roster names in registration order.
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Add `count` new tables with generated ids.
    pub fn add_tables(&mut self, count: usize) -> &[Table] {
        let start = self.tables.len();
        self.tables.extend((0..count).map(|_| Table::new()));
        &self.tables[start..]
    }

    /// Remove the `count` most recently added tables.
    pub fn remove_tables(&mut self, count: usize) -> Result<Vec<Table>, RegistryError> {
        let available = self.tables.len();
        if count > available {
            return Err(RegistryError::NotEnoughTables {
                requested: count,
                available,
            });
        }
        Ok(self.tables.split_off(available - count))
    }

    /// Import players from CSV: first column of each row, an optional `name` header,
    /// blank rows and names already registered are skipped. Returns how many were added.
    pub fn import_players_csv<R: Read>(&mut self, reader: R) -> Result<usize, RegistryError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut added = 0;
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let Some(name) = record.get(0) else { continue };
            if name.is_empty() || (i == 0 && name.eq_ignore_ascii_case("name")) {
                continue;
            }
            match self.add_player(name) {
                Ok(_) => added += 1,
                Err(RegistryError::DuplicatePlayer(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Id for the next tournament (`T<n>`).
    pub fn next_tournament_id(&self) -> String {
        format!("T{}", self.tournaments.len() + 1)
    }

    /// The most recently started tournament.
    pub fn latest_tournament(&self) -> Option<&Tournament> {
        self.tournaments.last()
    }

    pub fn latest_tournament_mut(&mut self) -> Option<&mut Tournament> {
        self.tournaments.last_mut()
    }

    /// Drop every tournament; roster and tables are kept. Returns how many were removed.
    pub fn clear_tournaments(&mut self) -> usize {
        let removed = self.tournaments.len();
        self.tournaments.clear();
        removed
    }
}
