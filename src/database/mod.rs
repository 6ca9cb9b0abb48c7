//! Database module
//!
//! This module provides all database functionality for schemata, organized into:
//!
//! - **core**: Connection wrapper and identifier rules
//! - **catalog**: The storage directory as a catalog of database files
//! - **schema**: Table creation from runtime specs and live schema inspection
//! - **data**: Unfiltered table reads into generic records
//!
//! # Architecture
//!
//! ```text
//! database/
//! ├── core/           # Foundation
//! │   ├── connection  # Scoped SQLite DatabaseConn wrapper
//! │   └── identifier  # Name validation and quoting
//! │
//! ├── catalog/        # One file per database
//! │   ├── registry    # name -> <dir>/<name>.db, directory listing
//! │   └── provisioner # Create new database files
//! │
//! ├── schema/         # Dynamic schema
//! │   ├── spec        # TableSpec / ColumnSpec
//! │   ├── builder     # CREATE TABLE from a spec
//! │   └── inspector   # sqlite_master / pragma_table_info
//! │
//! └── data/
//!     └── reader      # SELECT * into records
//! ```
//!
//! # Connection Lifecycle
//!
//! Every operation opens its own connection, runs a single statement, and drops
//! the connection before returning. Nothing is pooled or cached between calls;
//! all state lives in the database files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use schemata::database::{
//!     ColumnSpec, DatabaseProvisioner, DatabaseRegistry, SchemaBuilder, SchemaInspector,
//!     TableSpec,
//! };
//!
//! let registry = DatabaseRegistry::new("/var/lib/schemata");
//! let shop = DatabaseProvisioner::new(&registry).create_database("shop")?;
//!
//! let spec = TableSpec::new(
//!     "products",
//!     vec![
//!         ColumnSpec::new("id", "INTEGER").primary_key(),
//!         ColumnSpec::new("title", "TEXT").not_null(),
//!     ],
//! );
//! SchemaBuilder::new().create_table(&shop, &spec)?;
//!
//! for column in SchemaInspector::new().get_table_metadata(&shop, "products")? {
//!     println!("{} {} {}", column.ordinal, column.name, column.type_name);
//! }
//! ```

pub mod catalog;
pub mod core;
pub mod data;
pub mod schema;

pub use catalog::{
    DatabaseHandle, DatabaseInfo, DatabaseProvisioner, DatabaseRegistry, DatabaseState,
    DATABASE_EXTENSION,
};
pub use self::core::{ConnectionOptions, DatabaseConn, DEFAULT_BUSY_TIMEOUT};
pub use data::{DataReader, Record};
pub use schema::{ColumnInfo, ColumnSpec, SchemaBuilder, SchemaInspector, TableCreated, TableSpec};

/// Ensure the data directory exists
pub fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))
}
