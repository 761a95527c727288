use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::Path;

use crate::errors::{AppError, AppResult};

/// Owns the single SQLite connection used by a session.
///
/// Constructed once in `main` and passed down; nothing reaches it globally.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens an existing database file read-only.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| AppError::Connect(format!("Open {} failed: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "opened property database");
        Ok(Self { conn })
    }

    /// Opens the database file for writing, creating it when missing.
    pub fn open_or_create(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| AppError::Connect(format!("Open {} failed: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "opened property database for writing");
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Connect(format!("Open in-memory DB failed: {e}")))?;
        Ok(Self { conn })
    }

    /// Provides the connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        f(&self.conn)
    }
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: impl AsRef<Path>) -> AppResult<()> {
    let schema_path = schema_path.as_ref();
    let schema_sql = fs::read_to_string(schema_path).map_err(|e| {
        AppError::Schema(format!("Failed to read {}: {e}", schema_path.display()))
    })?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| AppError::Schema(format!("Failed to apply schema: {e}")))
    })?;

    tracing::info!(path = %schema_path.display(), "database initialized from schema file");
    Ok(())
}
