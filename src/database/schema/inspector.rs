//! Schema inspection
//!
//! Everything here is read live from the engine's own catalog (`sqlite_master`
//! and `pragma_table_info`); no metadata is stored separately.

use crate::database::catalog::DatabaseHandle;
use crate::database::core::identifier::USER_TABLE_FILTER;
use crate::error::{DbError, DbResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Column descriptor as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// 0-based position in the table
    pub ordinal: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub not_null: bool,
    /// Default value expression as written in the DDL
    #[serde(rename = "default")]
    pub default_value: Option<String>,
    pub is_primary_key: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaInspector;

impl SchemaInspector {
    pub fn new() -> Self {
        Self
    }

    /// List user tables, excluding the engine's `sqlite_` tables
    pub fn list_tables(&self, db: &DatabaseHandle) -> DbResult<Vec<String>> {
        let conn = db.connect()?;
        let sql = format!("SELECT name FROM sqlite_master WHERE {}", USER_TABLE_FILTER);
        let mut stmt = conn
            .conn
            .prepare(&sql)
            .map_err(|e| DbError::storage(format!("Failed to list tables: {}", e)))?;

        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DbError::storage(format!("Failed to list tables: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::storage(format!("Failed to read table name: {}", e)))?;

        debug!("{}: {} table(s)", db.name(), tables.len());
        Ok(tables)
    }

    /// Column metadata for one table, in column order
    ///
    /// An unknown table yields no descriptor rows and is reported as
    /// [`DbError::NotFound`].
    pub fn get_table_metadata(
        &self,
        db: &DatabaseHandle,
        table_name: &str,
    ) -> DbResult<Vec<ColumnInfo>> {
        if table_name.is_empty() {
            return Err(DbError::validation("Table name is required"));
        }

        let conn = db.connect()?;
        let mut stmt = conn
            .conn
            .prepare(
                r#"SELECT cid, name, type, "notnull", dflt_value, pk
                   FROM pragma_table_info(?1)
                   ORDER BY cid"#,
            )
            .map_err(|e| DbError::storage(format!("Failed to read table info: {}", e)))?;

        let columns = stmt
            .query_map([table_name], |row| {
                Ok(ColumnInfo {
                    ordinal: row.get(0)?,
                    name: row.get(1)?,
                    type_name: row.get(2)?,
                    not_null: row.get::<_, i64>(3)? != 0,
                    default_value: row.get(4)?,
                    is_primary_key: row.get::<_, i64>(5)? > 0,
                })
            })
            .map_err(|e| DbError::storage(format!("Failed to read table info: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::storage(format!("Failed to read column info: {}", e)))?;

        if columns.is_empty() {
            return Err(DbError::not_found(format!(
                "Table '{}' not found in database '{}'",
                table_name,
                db.name()
            )));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::catalog::{DatabaseProvisioner, DatabaseRegistry};

    fn setup() -> (tempfile::TempDir, DatabaseHandle) {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = DatabaseProvisioner::new(&registry)
            .create_database("inspect")
            .unwrap();
        (dir, db)
    }

    #[test]
    fn test_list_tables_empty() {
        let (_dir, db) = setup();
        assert!(SchemaInspector::new().list_tables(&db).unwrap().is_empty());
    }

    #[test]
    fn test_list_tables_hides_internal() {
        let (_dir, db) = setup();
        db.connect()
            .unwrap()
            .execute_ddl("CREATE TABLE counters (id INTEGER PRIMARY KEY AUTOINCREMENT)")
            .unwrap();

        // AUTOINCREMENT creates sqlite_sequence behind the scenes
        let tables = SchemaInspector::new().list_tables(&db).unwrap();
        assert_eq!(tables, vec!["counters"]);
    }

    #[test]
    fn test_list_tables_keeps_lookalike_names() {
        let (_dir, db) = setup();
        let conn = db.connect().unwrap();
        conn.execute_ddl("CREATE TABLE sqlitefoo (id INTEGER)").unwrap();
        conn.execute_ddl("CREATE TABLE SQLite1 (id INTEGER)").unwrap();
        conn.close().unwrap();

        let mut tables = SchemaInspector::new().list_tables(&db).unwrap();
        tables.sort();
        assert_eq!(tables, vec!["SQLite1", "sqlitefoo"]);
    }

    #[test]
    fn test_metadata_with_default() {
        let (_dir, db) = setup();
        db.connect()
            .unwrap()
            .execute_ddl("CREATE TABLE items (id INTEGER PRIMARY KEY, qty INTEGER NOT NULL DEFAULT 0, note TEXT)")
            .unwrap();

        let cols = SchemaInspector::new()
            .get_table_metadata(&db, "items")
            .unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(
            cols[1],
            ColumnInfo {
                ordinal: 1,
                name: "qty".to_string(),
                type_name: "INTEGER".to_string(),
                not_null: true,
                default_value: Some("0".to_string()),
                is_primary_key: false,
            }
        );
        assert!(cols[0].is_primary_key);
        assert_eq!(cols[2].default_value, None);
    }

    #[test]
    fn test_metadata_missing_table() {
        let (_dir, db) = setup();
        let err = SchemaInspector::new()
            .get_table_metadata(&db, "missing")
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = registry.handle("absent").unwrap();

        assert!(matches!(
            SchemaInspector::new().list_tables(&db),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_column_info_serialization() {
        let info = ColumnInfo {
            ordinal: 0,
            name: "id".to_string(),
            type_name: "INTEGER".to_string(),
            not_null: false,
            default_value: None,
            is_primary_key: true,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(
            json,
            r#"{"ordinal":0,"name":"id","type":"INTEGER","notNull":false,"default":null,"isPrimaryKey":true}"#
        );
    }
}
