//! Database connection management
//!
//! This module provides the connection wrapper used by every database operation.
//! A `DatabaseConn` lives for exactly one operation: it is opened, used for one
//! statement, and closed when it goes out of scope.

use crate::error::{DbError, DbResult};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default time to wait on a locked database file before giving up
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Options applied to every connection when it is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// How long the engine keeps retrying when the file is locked by another writer
    pub busy_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Core database connection wrapper
///
/// `DatabaseConn` owns a single SQLite connection. Dropping it closes the
/// connection, so every exit path of an operation releases the file.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Open a database file, creating it if it does not exist yet
    pub fn open_or_create(path: &Path, options: ConnectionOptions) -> DbResult<Self> {
        debug!("opening (create) database at {}", path.display());
        let conn = Connection::open(path).map_err(|e| {
            DbError::storage(format!(
                "Failed to open database at '{}': {}",
                path.display(),
                e
            ))
        })?;

        let db = DatabaseConn { conn };
        db.configure(options)?;
        Ok(db)
    }

    /// Open an existing database file
    ///
    /// Never creates the file; a missing file is reported as [`DbError::NotFound`].
    pub fn open_existing(path: &Path, options: ConnectionOptions) -> DbResult<Self> {
        if !path.is_file() {
            return Err(DbError::not_found(format!(
                "Database '{}' does not exist",
                path.display()
            )));
        }

        debug!("opening database at {}", path.display());
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            DbError::storage(format!(
                "Failed to open database at '{}': {}",
                path.display(),
                e
            ))
        })?;

        let db = DatabaseConn { conn };
        db.configure(options)?;
        Ok(db)
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DbError::storage(format!("Failed to create in-memory database: {}", e)))?;
        let db = DatabaseConn { conn };
        db.configure(ConnectionOptions::default())?;
        Ok(db)
    }

    /// Configure the connection
    fn configure(&self, options: ConnectionOptions) -> DbResult<()> {
        // Wait on locked files instead of failing immediately
        self.conn
            .busy_timeout(options.busy_timeout)
            .map_err(|e| DbError::storage(format!("Failed to set busy timeout: {}", e)))?;

        self.conn
            .execute("PRAGMA foreign_keys=ON", [])
            .map_err(|e| DbError::storage(format!("Failed to enable foreign keys: {}", e)))?;

        Ok(())
    }

    /// Execute a single data-definition statement
    ///
    /// Engine rejections are reported as [`DbError::Schema`] with the engine's text.
    pub fn execute_ddl(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute(sql, [])
            .map(|_| ())
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ffi_err, _) if is_lock_error(ffi_err.code) => {
                    DbError::storage(format!("Database is locked: {}", e))
                }
                _ => DbError::schema(e.to_string()),
            })
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> DbResult<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get(0),
            )
            .map_err(|e| DbError::storage(format!("Failed to check table existence: {}", e)))?;
        Ok(count > 0)
    }

    /// Close the connection explicitly, surfacing any error from the engine
    pub fn close(self) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| DbError::storage(format!("Failed to close database: {}", e)))
    }
}

fn is_lock_error(code: rusqlite::ErrorCode) -> bool {
    matches!(
        code,
        rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
    )
}

/// Classify an engine error raised while reading
///
/// "no such table" becomes [`DbError::NotFound`]; anything else is a storage failure.
pub(crate) fn read_error(table_name: &str, e: rusqlite::Error) -> DbError {
    let message = e.to_string();
    if message.contains("no such table") {
        DbError::not_found(format!("Table '{}' not found", table_name))
    } else {
        DbError::storage(message)
    }
}
