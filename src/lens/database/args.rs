//! Database lens arguments
//!
//! These arguments mirror the request shapes of the database operations and are
//! reusable across the CLI (clap) and any JSON front end (serde).

use serde::{Deserialize, Serialize};

use crate::database::{ColumnSpec, TableSpec};

/// Arguments for creating a database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct DatabaseCreateArgs {
    /// Name of the database; stored as `<name>.db`
    #[cfg_attr(feature = "cli", clap(value_name = "NAME"))]
    #[serde(default)]
    pub name: String,
}

impl DatabaseCreateArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Arguments for operations scoped to one database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(rename_all = "camelCase")]
pub struct DatabaseRefArgs {
    /// Name of the database (without the `.db` extension)
    #[cfg_attr(feature = "cli", clap(value_name = "DB"))]
    #[serde(default)]
    pub db_name: String,
}

impl DatabaseRefArgs {
    pub fn new(db_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
        }
    }
}

/// Arguments for operations scoped to one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(rename_all = "camelCase")]
pub struct TableRefArgs {
    /// Name of the database (without the `.db` extension)
    #[cfg_attr(feature = "cli", clap(value_name = "DB"))]
    #[serde(default)]
    pub db_name: String,

    /// Name of the table
    #[cfg_attr(feature = "cli", clap(value_name = "TABLE"))]
    #[serde(default)]
    pub table_name: String,
}

impl TableRefArgs {
    pub fn new(db_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
            table_name: table_name.into(),
        }
    }
}

/// Arguments for creating a table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(rename_all = "camelCase")]
pub struct TableCreateArgs {
    /// Name of the database (without the `.db` extension)
    #[cfg_attr(feature = "cli", clap(value_name = "DB"))]
    #[serde(default)]
    pub db_name: String,

    /// Name of the new table
    #[cfg_attr(feature = "cli", clap(value_name = "TABLE"))]
    #[serde(default)]
    pub table_name: String,

    /// Column definition as name:TYPE[:pk][:notnull]; repeat in column order
    #[cfg_attr(
        feature = "cli",
        clap(short = 'C', long = "column", value_name = "name:TYPE[:pk][:notnull]")
    )]
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

impl TableCreateArgs {
    pub fn new(
        db_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        Self {
            db_name: db_name.into(),
            table_name: table_name.into(),
            columns,
        }
    }

    pub fn table_spec(&self) -> TableSpec {
        TableSpec::new(self.table_name.clone(), self.columns.clone())
    }
}
