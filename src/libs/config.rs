//! Settings for opening a persistent chat.

use crate::libs::storage::database::storage_sqllite::SqliteStore;
use crate::ChatError;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `toLocaleTimeString()` in an en-US locale, e.g. `2:05:09 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M:%S %p";

pub const DEFAULT_DATABASE_PATH: &str = "demo_chat.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// SQLite file holding the persisted key-value entries.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// chrono format string for the `time` field of new messages.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            time_format: default_time_format(),
        }
    }
}

impl ChatConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChatError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ChatError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        validate_time_format(&config.time_format)?;
        Ok(config)
    }

    pub fn open_store(&self) -> Result<SqliteStore, ChatError> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ChatError::Config(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }
        Ok(SqliteStore::open(&self.database_path)?)
    }
}

/// Rejects chrono format strings containing unknown specifiers.
pub fn validate_time_format(time_format: &str) -> Result<(), ChatError> {
    if StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error)) {
        return Err(ChatError::Config(format!(
            "invalid time_format {:?}",
            time_format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChatConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        std::fs::write(&path, r#"{ "time_format": "%H:%M" }"#).unwrap();

        let config = ChatConfig::load(&path).unwrap();
        assert_eq!(config.time_format, "%H:%M");
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        std::fs::write(&path, "database_path = 3").unwrap();

        assert!(matches!(ChatConfig::load(&path), Err(ChatError::Config(_))));
    }

    #[test]
    fn unknown_time_specifier_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        std::fs::write(&path, r#"{ "time_format": "%Q" }"#).unwrap();

        assert!(matches!(ChatConfig::load(&path), Err(ChatError::Config(_))));
        assert!(validate_time_format(DEFAULT_TIME_FORMAT).is_ok());
        assert!(validate_time_format("%H:%M").is_ok());
    }
}
