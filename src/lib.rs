#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Schemata - dynamic schemas over file-backed SQLite databases
//!
//! Schemata provisions isolated SQLite databases on demand, creates tables from
//! column definitions supplied at runtime, and reads the resulting schema and
//! contents back as structured data. No schema is fixed at compile time; the
//! storage directory and the engine's own catalog are the only sources of truth.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `database` | Registry, provisioning, schema build/inspect, reads | `rusqlite` |
//! | `lens` | Operation facade with serde request/response shapes | `serde_json` |
//! | `cli` | Full CLI binary with table output | All above + `clap`, `tabled` |
//!
//! ```toml
//! # Library only
//! schemata = { version = "0.1", default-features = false, features = ["lens"] }
//!
//! # Default (CLI binary)
//! schemata = "0.1"
//! ```
//!
//! # Architecture
//!
//! - **[`database`]**: Database functionality (always available)
//!   - `core`: connection wrapper and identifier rules
//!   - `catalog`: `DatabaseRegistry` and `DatabaseProvisioner`
//!   - `schema`: `SchemaBuilder` and `SchemaInspector`
//!   - `data`: `DataReader`
//! - **[`lens`]**: Operation facade (`lens` feature)
//! - **[`config`]**: Configuration management
//! - **[`error`]**: `DbError` taxonomy shared by all operations
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use schemata::database::{ColumnSpec, DatabaseRegistry, DataReader, TableSpec};
//! use schemata::database::{DatabaseProvisioner, SchemaBuilder};
//!
//! let registry = DatabaseRegistry::new("/tmp/schemata");
//! let shop = DatabaseProvisioner::new(&registry).create_database("shop")?;
//!
//! SchemaBuilder::new().create_table(
//!     &shop,
//!     &TableSpec::new("products", vec![ColumnSpec::new("id", "INTEGER").primary_key()]),
//! )?;
//!
//! let rows = DataReader::new().get_table_data(&shop, "products")?;
//! assert!(rows.is_empty());
//! ```

pub mod config;
pub mod database;
pub mod error;

#[cfg(feature = "lens")]
pub mod lens;

// =============================================================================
// Configuration
// =============================================================================

pub use config::{format_size, SchemataConfig};

// =============================================================================
// Errors
// =============================================================================

pub use error::{DbError, DbResult, ErrorKind};

// =============================================================================
// Database Module - Re-export commonly used types
// =============================================================================

pub use database::{
    ColumnInfo, ColumnSpec, ConnectionOptions, DataReader, DatabaseConn, DatabaseHandle,
    DatabaseInfo, DatabaseProvisioner, DatabaseRegistry, DatabaseState, Record, SchemaBuilder,
    SchemaInspector, TableCreated, TableSpec,
};

// =============================================================================
// Lens Module - Feature-gated exports
// =============================================================================

#[cfg(feature = "lens")]
pub use lens::database::DatabaseLens;

#[cfg(feature = "lens")]
pub use lens::utils::OutputFormat;
