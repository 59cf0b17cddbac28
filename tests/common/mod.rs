#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone};
use demo_chat_lib::libs::core::clock::Clock;
use demo_chat_lib::libs::core::demo_users::DEMO_USERS;
use demo_chat_lib::libs::session::controller::ChatController;
use demo_chat_lib::libs::storage::database::storage_sqllite::SqliteStore;
use demo_chat_lib::libs::storage::memory_store::MemoryStore;
use demo_chat_lib::{KeyValueStore, Message, User};
use std::cell::Cell;
use tempfile::TempDir;

/// Advances one second per reading so consecutive messages get distinct ids.
pub struct TickingClock {
    next: Cell<DateTime<Local>>,
}

impl TickingClock {
    pub fn new() -> Self {
        Self {
            next: Cell::new(Local.with_ymd_and_hms(2024, 5, 4, 14, 5, 9).unwrap()),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Local> {
        let now = self.next.get();
        self.next.set(now + Duration::seconds(1));
        now
    }
}

pub fn memory_chat() -> ChatController<MemoryStore, TickingClock> {
    ChatController::new(MemoryStore::new(), TickingClock::new())
}

/// A fresh database file in its own temp directory. Keep the directory alive
/// for as long as the store is used.
pub fn sqlite_path() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create test directory");
    let path = dir.path().join("local_storage.db");
    (dir, path)
}

pub fn open_sqlite(path: &std::path::Path) -> SqliteStore {
    SqliteStore::open(path).expect("Failed to open sqlite store")
}

pub fn demo_user(username: &str) -> User {
    DEMO_USERS
        .iter()
        .find(|user| user.username == username)
        .cloned()
        .expect("unknown demo user")
}

pub fn stored_messages<S: KeyValueStore>(store: &S, key: &str) -> Option<Vec<Message>> {
    store
        .get(key)
        .expect("Failed to read store")
        .map(|raw| serde_json::from_str(&raw).expect("stored conversation should be valid JSON"))
}
