//! Dynamic schema definition and inspection
//!
//! - `spec`: caller-supplied table and column definitions
//! - `builder`: renders and executes `CREATE TABLE` from a spec
//! - `inspector`: lists tables and reads column descriptors from the engine

mod builder;
mod inspector;
mod spec;

pub use builder::{SchemaBuilder, TableCreated};
pub use inspector::{ColumnInfo, SchemaInspector};
pub use spec::{ColumnSpec, TableSpec};
