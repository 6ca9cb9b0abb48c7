//! Table and column definitions supplied by callers at runtime

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One column of a table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub name: String,
    /// Engine type token, e.g. `INTEGER`, `TEXT`, `VARCHAR(255)`
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub not_null: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            primary_key: false,
            not_null: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
}

/// Renders the column definition: `<name> <type>[ PRIMARY KEY][ NOT NULL]`
impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.type_name.trim())?;
        if self.primary_key {
            write!(f, " PRIMARY KEY")?;
        }
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

/// Parse the compact command-line form `name:TYPE[:pk][:notnull]`
///
/// Flags are case-insensitive; `pk`/`primary_key` and `nn`/`notnull`/`not_null`
/// are accepted.
impl FromStr for ColumnSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default().trim();
        let type_name = parts
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| format!("column '{}' is missing a type (expected name:TYPE)", s))?;

        let mut column = ColumnSpec::new(name, type_name);
        for flag in parts {
            match flag.trim().to_lowercase().as_str() {
                "pk" | "primary_key" | "primarykey" => column.primary_key = true,
                "nn" | "notnull" | "not_null" => column.not_null = true,
                other => {
                    return Err(format!(
                        "unknown column flag '{}' in '{}' (expected pk or notnull)",
                        other, s
                    ))
                }
            }
        }
        Ok(column)
    }
}

/// A table definition: name plus ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}
