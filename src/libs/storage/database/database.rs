use crate::libs::storage::database::storage_sqllite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::storage_traits::{StoreError, Transactional};
use tracing::info;

pub(crate) fn db_migration(store: &SqliteStore) -> Result<(), StoreError> {
    let mut connection = store.new_connection()?;
    let sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    // one row per localStorage entry; values are stored verbatim
    sqlite_transaction
        .inner()
        .execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            );",
            [],
        )
        .map_err(|e| StoreError::Initialisation(e.to_string()))?;

    sqlite_transaction.commit().map_err(|err| {
        StoreError::Initialisation(format!("Could not commit initial db: {}", err))
    })?;

    info!("local storage schema ready");
    Ok(())
}
