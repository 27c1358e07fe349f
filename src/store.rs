//! Flat-file JSON persistence for the [`Database`].
//!
//! Every command runs as one transaction: load, mutate, save, all under a single
//! mutex so concurrent commands never work on stale copies.

use crate::models::{Database, RegistryError, TournamentError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors from the store: I/O and format problems, or the rejected command itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database lock poisoned")]
    LockPoisoned,
    #[error(transparent)]
    Tournament(#[from] TournamentError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl StoreError {
    /// True when the command was rejected (bad input or state), not a storage failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Tournament(_) | StoreError::Registry(_))
    }
}

/// JSON file store. A missing file reads as an empty database.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only snapshot of the database.
    pub fn snapshot(&self) -> Result<Database, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.read()
    }

    /// Load, apply `f`, and save if `f` succeeds. Nothing is written when `f` fails.
    pub fn transact<T, E, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Database) -> Result<T, E>,
        StoreError: From<E>,
    {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut db = self.read()?;
        let value = f(&mut db)?;
        self.write(&db)?;
        Ok(value)
    }

    fn read(&self) -> Result<Database, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Database::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Database::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the database file.
    fn write(&self, db: &Database) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(db)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Saved database to {}", self.path.display());
        Ok(())
    }
}
