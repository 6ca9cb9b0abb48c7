//! Database registry
//!
//! The storage directory is the catalog: every `<name>.db` file in it is a
//! database. The registry derives handles from names and enumerates the files
//! that exist, nothing more.

use crate::database::core::identifier::{validate_database_name, USER_TABLE_FILTER};
use crate::database::core::{ConnectionOptions, DatabaseConn};
use crate::error::{DbError, DbResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension used for database files
pub const DATABASE_EXTENSION: &str = "db";

/// Whether a database file exists on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseState {
    NonExistent,
    Present,
}

/// Reference to a database by name and derived storage path
///
/// A handle is not an open connection; [`DatabaseHandle::connect`] opens one
/// for the duration of a single operation.
#[derive(Debug, Clone)]
pub struct DatabaseHandle {
    name: String,
    path: PathBuf,
    options: ConnectionOptions,
}

impl PartialEq for DatabaseHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.path == other.path
    }
}

impl Eq for DatabaseHandle {}

impl DatabaseHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the database, e.g. `shop.db`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, DATABASE_EXTENSION)
    }

    pub fn state(&self) -> DatabaseState {
        if self.path.is_file() {
            DatabaseState::Present
        } else {
            DatabaseState::NonExistent
        }
    }

    pub fn exists(&self) -> bool {
        self.state() == DatabaseState::Present
    }

    /// Open a connection to the existing database file
    pub fn connect(&self) -> DbResult<DatabaseConn> {
        DatabaseConn::open_existing(&self.path, self.options).map_err(|e| match e {
            DbError::NotFound(_) => {
                DbError::not_found(format!("Database '{}' not found", self.name))
            }
            other => other,
        })
    }

    /// Open a connection, creating the database file if needed
    pub(crate) fn connect_or_create(&self) -> DbResult<DatabaseConn> {
        DatabaseConn::open_or_create(&self.path, self.options)
    }
}

/// Summary of a single database
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInfo {
    pub name: String,
    pub path: String,
    pub size_bytes: u64,
    pub table_count: u64,
}

/// Enumerates the databases in a storage directory
#[derive(Debug, Clone)]
pub struct DatabaseRegistry {
    storage_dir: PathBuf,
    options: ConnectionOptions,
}

impl DatabaseRegistry {
    /// Create a registry over the given storage directory
    ///
    /// The directory does not need to exist yet; it is created on first use.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            options: ConnectionOptions::default(),
        }
    }

    /// Override the options applied to connections opened through this registry's handles
    pub fn with_options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn options(&self) -> ConnectionOptions {
        self.options
    }

    /// Create the storage directory if it is missing
    pub fn ensure_storage_dir(&self) -> DbResult<()> {
        std::fs::create_dir_all(&self.storage_dir).map_err(|e| {
            DbError::storage(format!(
                "Failed to create storage directory '{}': {}",
                self.storage_dir.display(),
                e
            ))
        })
    }

    /// Storage path for a database name: `<storage_dir>/<name>.db`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.storage_dir
            .join(format!("{}.{}", name, DATABASE_EXTENSION))
    }

    /// Resolve a database name to a handle
    ///
    /// The database may or may not exist; check [`DatabaseHandle::state`].
    pub fn handle(&self, name: &str) -> DbResult<DatabaseHandle> {
        validate_database_name(name)?;
        Ok(self.unchecked_handle(name))
    }

    fn unchecked_handle(&self, name: &str) -> DatabaseHandle {
        DatabaseHandle {
            name: name.to_string(),
            path: self.path_for(name),
            options: self.options,
        }
    }

    /// List every database file in the storage directory
    ///
    /// Order follows the filesystem listing and is not guaranteed to be stable.
    pub fn list_databases(&self) -> DbResult<Vec<DatabaseHandle>> {
        self.ensure_storage_dir()?;

        let entries = std::fs::read_dir(&self.storage_dir).map_err(|e| {
            DbError::storage(format!(
                "Failed to read storage directory '{}': {}",
                self.storage_dir.display(),
                e
            ))
        })?;

        let mut handles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                DbError::storage(format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(DATABASE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                // a file no operation could open by name is not a database
                if let Err(e) = validate_database_name(stem) {
                    debug!("skipping {}: {}", path.display(), e.message());
                    continue;
                }
                handles.push(self.unchecked_handle(stem));
            }
        }

        debug!(
            "found {} database(s) in {}",
            handles.len(),
            self.storage_dir.display()
        );
        Ok(handles)
    }

    /// Describe an existing database: file size and number of user tables
    pub fn describe(&self, handle: &DatabaseHandle) -> DbResult<DatabaseInfo> {
        let db = handle.connect()?;
        let sql = format!("SELECT COUNT(*) FROM sqlite_master WHERE {}", USER_TABLE_FILTER);
        let table_count: u64 = db
            .conn
            .query_row(&sql, [],
                |row| row.get(0),
            )
            .map_err(|e| DbError::storage(format!("Failed to count tables: {}", e)))?;
        drop(db);

        let size_bytes = std::fs::metadata(handle.path())
            .map(|m| m.len())
            .map_err(|e| DbError::storage(format!("Failed to stat database file: {}", e)))?;

        Ok(DatabaseInfo {
            name: handle.name().to_string(),
            path: handle.path().to_string_lossy().to_string(),
            size_bytes,
            table_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_derivation() {
        let registry = DatabaseRegistry::new("/data/dbs");
        let handle = registry.handle("shop").unwrap();
        assert_eq!(handle.name(), "shop");
        assert_eq!(handle.path(), Path::new("/data/dbs/shop.db"));
        assert_eq!(handle.file_name(), "shop.db");

        // same name, same file
        assert_eq!(handle, registry.handle("shop").unwrap());
    }

    #[test]
    fn test_handle_rejects_bad_names() {
        let registry = DatabaseRegistry::new("/data/dbs");
        assert!(matches!(registry.handle(""), Err(DbError::Validation(_))));
        assert!(matches!(
            registry.handle("../outside"),
            Err(DbError::Validation(_))
        ));
    }

    #[test]
    fn test_list_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("nested").join("dbs");
        let registry = DatabaseRegistry::new(&storage);

        let dbs = registry.list_databases().unwrap();
        assert!(dbs.is_empty());
        assert!(storage.is_dir());
    }

    #[test]
    fn test_list_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.db"), b"").unwrap();
        std::fs::write(dir.path().join("b.db"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("a.db-journal"), b"").unwrap();
        std::fs::create_dir(dir.path().join("dir.db")).unwrap();
        std::fs::write(dir.path().join("my shop.db"), b"").unwrap();
        std::fs::write(dir.path().join(".db"), b"").unwrap();

        let registry = DatabaseRegistry::new(dir.path());
        let mut names: Vec<String> = registry
            .list_databases()
            .unwrap()
            .iter()
            .map(|h| h.file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.db", "b.db"]);
    }

    #[test]
    fn test_state() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let handle = registry.handle("later").unwrap();
        assert_eq!(handle.state(), DatabaseState::NonExistent);

        std::fs::write(handle.path(), b"").unwrap();
        assert_eq!(handle.state(), DatabaseState::Present);
    }

    #[test]
    fn test_connect_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let handle = registry.handle("ghost").unwrap();

        let err = handle.connect().err().unwrap();
        assert_eq!(err.message(), "Database 'ghost' not found");
        assert!(!handle.path().exists());
    }

    #[test]
    fn test_describe() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let handle = registry.handle("info").unwrap();
        {
            let db = handle.connect_or_create().unwrap();
            db.execute_ddl("CREATE TABLE t1 (id INTEGER)").unwrap();
            db.execute_ddl("CREATE TABLE t2 (id INTEGER PRIMARY KEY AUTOINCREMENT)")
                .unwrap();
            db.execute_ddl("CREATE TABLE sqlitefoo (id INTEGER)").unwrap();
        }

        let info = registry.describe(&handle).unwrap();
        assert_eq!(info.name, "info");
        // sqlite_sequence is internal and not counted, sqlitefoo is a user table
        assert_eq!(info.table_count, 3);
        assert!(info.size_bytes > 0);
    }
}
