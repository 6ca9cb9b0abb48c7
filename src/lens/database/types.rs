//! Database lens output types
//!
//! Each struct serializes to the response body of the matching operation.

use serde::Serialize;

use crate::database::{ColumnInfo, Record};

/// Message returned after provisioning a database
pub const DATABASE_CREATED_MESSAGE: &str = "Database created successfully";

/// Message returned after creating a table
pub const TABLE_CREATED_MESSAGE: &str = "Table created successfully";

/// `{"databases": ["shop.db", ...]}`
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseList {
    pub databases: Vec<String>,
}

/// `{"message": ..., "name": "shop"}`
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseCreated {
    pub message: String,
    pub name: String,
}

/// `{"tables": ["products", ...]}`
#[derive(Debug, Clone, Serialize)]
pub struct TableList {
    pub tables: Vec<String>,
}

/// `{"message": ..., "tableName": "products"}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreateResult {
    pub message: String,
    pub table_name: String,
}

/// `{"columns": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct TableMetadata {
    pub columns: Vec<ColumnInfo>,
}

/// `{"data": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub data: Vec<Record>,
}

impl TableData {
    /// Column names in order, taken from the first record
    ///
    /// Empty when the table has no rows.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default()
    }
}
