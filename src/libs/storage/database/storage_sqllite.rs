use crate::libs::storage::database::database::db_migration;
use crate::libs::storage::storage_traits::{KeyValueStore, StoreError, Transactional};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Transaction};
use std::path::Path;

pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteTransaction<'conn> {
    pub fn new(conn: &'conn mut PooledConnection<SqliteConnectionManager>) -> Result<Self, StoreError> {
        let trans = conn.transaction()?;
        Ok(Self { tx: trans })
    }

    pub fn inner(&self) -> &Transaction<'conn> {
        &self.tx
    }
}

impl Transactional for SqliteTransaction<'_> {
    fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().map_err(|e| StoreError::Sqlite(e.to_string()))
    }

    fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().map_err(|e| StoreError::Sqlite(e.to_string()))
    }
}

/// `localStorage` stand-in backed by a SQLite file.
///
/// Several stores may point at the same file; each write commits on its own
/// and the last one wins.
pub struct SqliteStore {
    conn_pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::new(manager)?;
        Self::from_pool(pool)
    }

    /// Private database living as long as the store. The pool is pinned to a
    /// single connection because every in-memory connection is its own database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;
        Self::from_pool(pool)
    }

    fn from_pool(conn_pool: Pool<SqliteConnectionManager>) -> Result<Self, StoreError> {
        let store = Self { conn_pool };
        db_migration(&store)?;
        Ok(store)
    }

    pub fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.conn_pool.get()?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let connection = self.new_connection()?;
        let value = connection
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<usize, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut connection = self.new_connection()?;
        let sqlite_transaction = SqliteTransaction::new(&mut connection)?;
        sqlite_transaction.inner().execute(
            "INSERT INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        sqlite_transaction.commit()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut connection = self.new_connection()?;
        let sqlite_transaction = SqliteTransaction::new(&mut connection)?;
        sqlite_transaction
            .inner()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        sqlite_transaction.commit()
    }
}
