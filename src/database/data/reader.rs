//! Full-table reads returning generic records

use crate::database::catalog::DatabaseHandle;
use crate::database::core::identifier::quote_identifier;
use crate::database::core::read_error;
use crate::error::{DbError, DbResult};
use rusqlite::types::ValueRef;
use serde_json::{Map, Number, Value};
use tracing::debug;

/// One row, keyed by column name in table column order
pub type Record = Map<String, Value>;

/// Convert an engine value into a JSON value without coercion
///
/// Text that is not valid UTF-8 is replaced lossily; blobs become byte arrays;
/// non-finite reals become `null`.
pub fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DataReader;

impl DataReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every row of a table
    ///
    /// No filtering, ordering, or paging. A missing table is [`DbError::NotFound`].
    pub fn get_table_data(&self, db: &DatabaseHandle, table_name: &str) -> DbResult<Vec<Record>> {
        if table_name.is_empty() {
            return Err(DbError::validation("Table name is required"));
        }

        let conn = db.connect()?;
        let sql = format!("SELECT * FROM {}", quote_identifier(table_name));
        let mut stmt = conn
            .conn
            .prepare(&sql)
            .map_err(|e| read_error(table_name, e))?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query([]).map_err(|e| read_error(table_name, e))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(|e| read_error(table_name, e))? {
            let mut record = Record::new();
            for (idx, column) in columns.iter().enumerate() {
                let value = row.get_ref(idx).map_err(|e| read_error(table_name, e))?;
                record.insert(column.clone(), value_to_json(value));
            }
            records.push(record);
        }

        debug!("{}.{}: read {} row(s)", db.name(), table_name, records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::catalog::{DatabaseProvisioner, DatabaseRegistry};
    use serde_json::json;

    fn setup() -> (tempfile::TempDir, DatabaseHandle) {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = DatabaseProvisioner::new(&registry)
            .create_database("reader")
            .unwrap();
        (dir, db)
    }

    #[test]
    fn test_empty_table() {
        let (_dir, db) = setup();
        db.connect()
            .unwrap()
            .execute_ddl("CREATE TABLE empty (id INTEGER)")
            .unwrap();

        let rows = DataReader::new().get_table_data(&db, "empty").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rows_keep_column_order_and_types() {
        let (_dir, db) = setup();
        let conn = db.connect().unwrap();
        conn.execute_ddl("CREATE TABLE mixed (zeta TEXT, alpha INTEGER, price REAL, raw BLOB, gone TEXT)")
            .unwrap();
        conn.conn
            .execute(
                "INSERT INTO mixed VALUES (?1, ?2, ?3, ?4, NULL)",
                rusqlite::params!["x", 7, 1.5, vec![1u8, 2, 255]],
            )
            .unwrap();
        drop(conn);

        let rows = DataReader::new().get_table_data(&db, "mixed").unwrap();
        assert_eq!(rows.len(), 1);

        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "price", "raw", "gone"]);
        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({"zeta": "x", "alpha": 7, "price": 1.5, "raw": [1, 2, 255], "gone": null})
        );
    }

    #[test]
    fn test_missing_table() {
        let (_dir, db) = setup();
        let err = DataReader::new().get_table_data(&db, "missing").unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_quoted_name_is_not_executed() {
        let (_dir, db) = setup();
        db.connect()
            .unwrap()
            .execute_ddl("CREATE TABLE victims (id INTEGER)")
            .unwrap();

        let err = DataReader::new()
            .get_table_data(&db, "victims; DROP TABLE victims")
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
        assert!(db.connect().unwrap().table_exists("victims").unwrap());
    }
}
