//! Lazily opened SQLite handle shared by every store operation.
//!
//! The connection is opened (and the schema migrated) on the first call to
//! [`DbPool::with_conn`], then cached for the lifetime of the pool.

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

enum Target {
    File(PathBuf),
    Memory,
}

pub struct DbPool {
    target: Target,
    conn: Mutex<Option<Connection>>,
    created_schema: AtomicBool,
}

impl DbPool {
    /// Pool over a database file. Nothing is touched on disk until the
    /// first operation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            target: Target::File(path.as_ref().to_path_buf()),
            conn: Mutex::new(None),
            created_schema: AtomicBool::new(false),
        }
    }

    /// Private in-memory database, gone when the pool is dropped.
    pub fn in_memory() -> Self {
        Self {
            target: Target::Memory,
            conn: Mutex::new(None),
            created_schema: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            Target::File(p) => Some(p),
            Target::Memory => None,
        }
    }

    /// Whether opening this pool created the schema on a fresh database.
    pub fn created_schema(&self) -> bool {
        self.created_schema.load(Ordering::Relaxed)
    }

    pub fn is_open(&self) -> bool {
        self.lock().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Helper to execute a closure with a mutable connection reference,
    /// opening the database first if needed.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut guard = self.lock()?;

        if guard.is_none() {
            let conn = self.open()?;
            *guard = Some(conn);
        }

        match guard.as_mut() {
            Some(conn) => func(conn),
            None => Err(AppError::Other("database handle missing after open".into())),
        }
    }

    fn open(&self) -> AppResult<Connection> {
        let conn = match &self.target {
            Target::File(p) => {
                if let Some(parent) = p.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                Connection::open(p)?
            }
            Target::Memory => Connection::open_in_memory()?,
        };

        // Several contexts may share one file.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        if run_pending_migrations(&conn)? {
            self.created_schema.store(true, Ordering::Relaxed);
        }
        Ok(conn)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|e| AppError::Other(format!("database handle poisoned: {e}")))
    }
}
