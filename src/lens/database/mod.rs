//! Database lens
//!
//! Operation facade over the database layer. Each method takes an args struct,
//! performs exactly one database action, and returns a serializable output that
//! matches the response body of the corresponding operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemata::database::{ColumnSpec, DatabaseRegistry};
//! use schemata::lens::database::{DatabaseCreateArgs, DatabaseLens, TableCreateArgs};
//!
//! let registry = DatabaseRegistry::new("/tmp/schemata");
//! let lens = DatabaseLens::new(&registry);
//!
//! lens.create_database(&DatabaseCreateArgs::new("shop"))?;
//! lens.create_table(&TableCreateArgs::new(
//!     "shop",
//!     "products",
//!     vec![ColumnSpec::new("id", "INTEGER").primary_key()],
//! ))?;
//! ```

mod args;
mod types;

pub use args::{DatabaseCreateArgs, DatabaseRefArgs, TableCreateArgs, TableRefArgs};
pub use types::{
    DatabaseCreated, DatabaseList, TableCreateResult, TableData, TableList, TableMetadata,
    DATABASE_CREATED_MESSAGE, TABLE_CREATED_MESSAGE,
};

use crate::database::{
    DataReader, DatabaseHandle, DatabaseInfo, DatabaseProvisioner, DatabaseRegistry,
    SchemaBuilder, SchemaInspector,
};
use crate::error::DbResult;
use tracing::{debug, warn};

/// Log a failed operation before handing the error back to the caller
fn logged<T>(operation: &str, result: DbResult<T>) -> DbResult<T> {
    if let Err(e) = &result {
        warn!("{} failed ({}): {}", operation, e.kind(), e.message());
    }
    result
}

pub struct DatabaseLens<'a> {
    registry: &'a DatabaseRegistry,
}

impl<'a> DatabaseLens<'a> {
    pub fn new(registry: &'a DatabaseRegistry) -> Self {
        Self { registry }
    }

    fn handle(&self, db_name: &str) -> DbResult<DatabaseHandle> {
        self.registry.handle(db_name)
    }

    /// List database files in the storage directory
    pub fn list_databases(&self) -> DbResult<DatabaseList> {
        debug!("list_databases in {}", self.registry.storage_dir().display());
        let handles = logged("list_databases", self.registry.list_databases())?;
        Ok(DatabaseList {
            databases: handles.iter().map(|h| h.file_name()).collect(),
        })
    }

    /// Create a new database (succeeds if it already exists)
    pub fn create_database(&self, args: &DatabaseCreateArgs) -> DbResult<DatabaseCreated> {
        debug!("create_database {:?}", args.name);
        let provisioner = DatabaseProvisioner::new(self.registry);
        let handle = logged("create_database", provisioner.create_database(&args.name))?;
        Ok(DatabaseCreated {
            message: DATABASE_CREATED_MESSAGE.to_string(),
            name: handle.name().to_string(),
        })
    }

    /// Summary of one database
    pub fn database_info(&self, args: &DatabaseRefArgs) -> DbResult<DatabaseInfo> {
        debug!("database_info {:?}", args.db_name);
        logged(
            "database_info",
            self.handle(&args.db_name)
                .and_then(|h| self.registry.describe(&h)),
        )
    }

    /// List user tables in a database
    pub fn list_tables(&self, args: &DatabaseRefArgs) -> DbResult<TableList> {
        debug!("list_tables {:?}", args.db_name);
        let tables = logged(
            "list_tables",
            self.handle(&args.db_name)
                .and_then(|h| SchemaInspector::new().list_tables(&h)),
        )?;
        Ok(TableList { tables })
    }

    /// Render the `CREATE TABLE` statement without executing it
    pub fn render_create_table(&self, args: &TableCreateArgs) -> DbResult<String> {
        logged(
            "render_create_table",
            SchemaBuilder::new().render_create_table(&args.table_spec()),
        )
    }

    /// Create a table from the given column specs
    pub fn create_table(&self, args: &TableCreateArgs) -> DbResult<TableCreateResult> {
        debug!("create_table {:?}.{:?}", args.db_name, args.table_name);
        let builder = SchemaBuilder::new();
        let spec = args.table_spec();
        let created = logged(
            "create_table",
            builder
                .validate(&spec)
                .and_then(|_| self.handle(&args.db_name))
                .and_then(|h| builder.create_table(&h, &spec)),
        )?;
        Ok(TableCreateResult {
            message: TABLE_CREATED_MESSAGE.to_string(),
            table_name: created.table_name,
        })
    }

    /// Column metadata for a table
    pub fn table_metadata(&self, args: &TableRefArgs) -> DbResult<TableMetadata> {
        debug!("table_metadata {:?}.{:?}", args.db_name, args.table_name);
        let columns = logged(
            "table_metadata",
            self.handle(&args.db_name)
                .and_then(|h| SchemaInspector::new().get_table_metadata(&h, &args.table_name)),
        )?;
        Ok(TableMetadata { columns })
    }

    /// Every row of a table
    pub fn table_data(&self, args: &TableRefArgs) -> DbResult<TableData> {
        debug!("table_data {:?}.{:?}", args.db_name, args.table_name);
        let data = logged(
            "table_data",
            self.handle(&args.db_name)
                .and_then(|h| DataReader::new().get_table_data(&h, &args.table_name)),
        )?;
        Ok(TableData { data })
    }
}
