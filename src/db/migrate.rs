use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, TransactionBehavior};

/// Schema version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Read the schema version stamped on the database (0 = fresh file).
pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Internal operation log, written by `db::log::ttlog`.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// Record table keyed by `id` plus the `completed` index used by `list`.
fn create_items_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id           TEXT PRIMARY KEY NOT NULL,
            title        TEXT NOT NULL,
            description  TEXT,
            created      INTEGER NOT NULL,
            updated      INTEGER NOT NULL,
            completed    INTEGER NOT NULL DEFAULT 0 CHECK(completed IN (0, 1)),
            color        TEXT,
            complete_by  INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_items_completed ON items(completed);
        "#,
    )
}

/// Public entry point: bring the schema up to `SCHEMA_VERSION`.
///
/// Runs once per opened connection; a database that is already current is
/// left untouched. Returns `true` when this call created the schema.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<bool> {
    if schema_version(conn)? == SCHEMA_VERSION {
        return Ok(false);
    }

    // IMMEDIATE takes the write lock up front, so two contexts opening the
    // same fresh file cannot both run the upgrade.
    let tx = rusqlite::Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let current = schema_version(&tx)?;

    if current > SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "database schema v{current} is newer than supported v{SCHEMA_VERSION}"
        )));
    }

    if current == 0 {
        ensure_log_table(&tx)?;
        create_items_table(&tx)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        return Ok(true);
    }

    // Another context finished the upgrade while we waited for the lock.
    tx.commit()?;
    Ok(false)
}
