//! Server configuration from environment variables (a `.env` file is honoured).

use crate::models::ByePolicy;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding players, tables and tournaments.
    pub database_path: PathBuf,
    pub bye_policy: ByePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: PathBuf::from("database.json"),
            bye_policy: ByePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read `HOST`, `PORT`, `DATABASE_PATH`, `BYE_POLICY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: format!("{e}"),
            })?,
            None => defaults.port,
        };
        let bye_policy = match lookup("BYE_POLICY") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| ConfigError::Invalid { var: "BYE_POLICY", reason })?,
            None => defaults.bye_policy,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            bye_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ServerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("DATABASE_PATH", "/tmp/db.json"),
            ("BYE_POLICY", "Greedy"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/db.json"));
        assert_eq!(cfg.bye_policy, ByePolicy::Greedy);
    }

    #[test]
    fn rejects_bad_port_and_policy() {
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("BYE_POLICY", "random")])).is_err());
    }
}
