pub mod libs;

use crate::libs::config::{validate_time_format, ChatConfig};
use crate::libs::core::clock::SystemClock;
use crate::libs::session::controller::ChatController;
use crate::libs::storage::database::storage_sqllite::SqliteStore;
use crate::libs::storage::storage_traits::StoreError;
use thiserror::Error;

pub use crate::libs::core::models::{Message, User, UserStatus};
pub use crate::libs::storage::storage_traits::KeyValueStore;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Opens the SQLite-backed store named by `config` and restores whatever
/// session was persisted in it.
pub fn open_chat(config: &ChatConfig) -> Result<ChatController<SqliteStore, SystemClock>, ChatError> {
    validate_time_format(&config.time_format)?;
    let store = config.open_store()?;
    Ok(ChatController::restore(store, SystemClock).with_time_format(&config.time_format))
}
