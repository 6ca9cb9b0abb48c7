//! Database provisioning
//!
//! Creating a database means opening its file in create mode. There is no
//! existence pre-check: provisioning an existing database succeeds and leaves
//! its contents alone.

use crate::database::catalog::registry::{DatabaseHandle, DatabaseRegistry};
use crate::error::DbResult;
use tracing::info;

pub struct DatabaseProvisioner<'a> {
    registry: &'a DatabaseRegistry,
}

impl<'a> DatabaseProvisioner<'a> {
    pub fn new(registry: &'a DatabaseRegistry) -> Self {
        Self { registry }
    }

    /// Create (or open) the database file for `name`
    pub fn create_database(&self, name: &str) -> DbResult<DatabaseHandle> {
        // validate before touching the filesystem
        let handle = self.registry.handle(name)?;
        self.registry.ensure_storage_dir()?;

        let existed = handle.exists();
        let db = handle.connect_or_create()?;
        db.close()?;

        if existed {
            info!("database '{}' already present at {}", name, handle.path().display());
        } else {
            info!("created database '{}' at {}", name, handle.path().display());
        }
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    #[test]
    fn test_create_database() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let provisioner = DatabaseProvisioner::new(&registry);

        let handle = provisioner.create_database("shop").unwrap();
        assert_eq!(handle.name(), "shop");
        assert!(dir.path().join("shop.db").is_file());
    }

    #[test]
    fn test_create_database_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let provisioner = DatabaseProvisioner::new(&registry);

        let handle = provisioner.create_database("shop").unwrap();
        handle
            .connect()
            .unwrap()
            .execute_ddl("CREATE TABLE keep (id INTEGER)")
            .unwrap();

        let again = provisioner.create_database("shop").unwrap();
        assert_eq!(handle, again);
        assert!(again.connect().unwrap().table_exists("keep").unwrap());
    }

    #[test]
    fn test_create_database_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("dbs");
        let registry = DatabaseRegistry::new(&storage);
        let provisioner = DatabaseProvisioner::new(&registry);

        let err = provisioner.create_database("").unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(err.message(), "Database name is required");
        // nothing touched on disk
        assert!(!storage.exists());
    }

    #[test]
    fn test_create_database_creates_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("late");
        let registry = DatabaseRegistry::new(&storage);

        DatabaseProvisioner::new(&registry)
            .create_database("first")
            .unwrap();
        assert!(storage.join("first.db").is_file());
    }
}
