//! Schema builder
//!
//! Turns a [`TableSpec`] into a single `CREATE TABLE` statement and runs it.

use crate::database::catalog::DatabaseHandle;
use crate::database::core::identifier::{
    validate_column_type, validate_identifier, validate_table_name,
};
use crate::database::schema::spec::TableSpec;
use crate::error::{DbError, DbResult};
use serde::Serialize;
use tracing::{debug, info};

/// Result of a successful `create_table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreated {
    pub table_name: String,
    /// The statement that was executed
    pub statement: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Check a table spec without touching any database
    pub fn validate(&self, spec: &TableSpec) -> DbResult<()> {
        if spec.name.is_empty() || spec.columns.is_empty() {
            return Err(DbError::validation("Table name and columns are required"));
        }
        validate_table_name(&spec.name)?;
        for column in &spec.columns {
            validate_identifier(&column.name, "Column")?;
            validate_column_type(&column.name, &column.type_name)?;
        }
        Ok(())
    }

    /// Render the `CREATE TABLE` statement for a spec
    ///
    /// Columns appear in the order given; the spec is validated first.
    pub fn render_create_table(&self, spec: &TableSpec) -> DbResult<String> {
        self.validate(spec)?;
        let column_defs = spec
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("CREATE TABLE {} ({})", spec.name, column_defs))
    }

    /// Create a table in an existing database
    ///
    /// The statement runs on its own and auto-commits. A duplicate table or a
    /// definition the engine refuses comes back as [`DbError::Schema`].
    pub fn create_table(&self, db: &DatabaseHandle, spec: &TableSpec) -> DbResult<TableCreated> {
        let statement = self.render_create_table(spec)?;
        debug!("{}: {}", db.name(), statement);

        let conn = db.connect()?;
        conn.execute_ddl(&statement)?;
        conn.close()?;

        info!("created table '{}' in database '{}'", spec.name, db.name());
        Ok(TableCreated {
            table_name: spec.name.clone(),
            statement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::catalog::{DatabaseProvisioner, DatabaseRegistry};
    use crate::database::schema::spec::ColumnSpec;

    fn products() -> TableSpec {
        TableSpec::new(
            "products",
            vec![
                ColumnSpec::new("id", "INTEGER").primary_key(),
                ColumnSpec::new("title", "TEXT").not_null(),
            ],
        )
    }

    #[test]
    fn test_render_create_table() {
        let sql = SchemaBuilder::new().render_create_table(&products()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE products (id INTEGER PRIMARY KEY, title TEXT NOT NULL)"
        );
    }

    #[test]
    fn test_validation() {
        let builder = SchemaBuilder::new();

        let err = builder
            .validate(&TableSpec::new("", vec![ColumnSpec::new("id", "INTEGER")]))
            .unwrap_err();
        assert_eq!(err.message(), "Table name and columns are required");

        let err = builder.validate(&TableSpec::new("t", vec![])).unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let bad_column = TableSpec::new("t", vec![ColumnSpec::new("x; DROP", "TEXT")]);
        assert!(matches!(
            builder.validate(&bad_column),
            Err(DbError::Validation(_))
        ));

        let bad_type = TableSpec::new("t", vec![ColumnSpec::new("x", "TEXT) --")]);
        assert!(matches!(
            builder.validate(&bad_type),
            Err(DbError::Validation(_))
        ));
    }

    #[test]
    fn test_create_table() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = DatabaseProvisioner::new(&registry)
            .create_database("shop")
            .unwrap();

        let created = SchemaBuilder::new().create_table(&db, &products()).unwrap();
        assert_eq!(created.table_name, "products");
        assert!(db.connect().unwrap().table_exists("products").unwrap());
    }

    #[test]
    fn test_create_table_twice() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = DatabaseProvisioner::new(&registry)
            .create_database("shop")
            .unwrap();
        let builder = SchemaBuilder::new();

        builder.create_table(&db, &products()).unwrap();
        let err = builder.create_table(&db, &products()).unwrap_err();
        match err {
            DbError::Schema(msg) => assert!(msg.contains("already exists"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_engine_rejections_are_schema_errors() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = DatabaseProvisioner::new(&registry)
            .create_database("shop")
            .unwrap();
        let builder = SchemaBuilder::new();

        let two_pks = TableSpec::new(
            "pairs",
            vec![
                ColumnSpec::new("a", "INTEGER").primary_key(),
                ColumnSpec::new("b", "INTEGER").primary_key(),
            ],
        );
        assert!(matches!(
            builder.create_table(&db, &two_pks),
            Err(DbError::Schema(_))
        ));

        let dup_columns = TableSpec::new(
            "dups",
            vec![ColumnSpec::new("a", "INTEGER"), ColumnSpec::new("a", "TEXT")],
        );
        assert!(matches!(
            builder.create_table(&db, &dup_columns),
            Err(DbError::Schema(_))
        ));
    }

    #[test]
    fn test_create_table_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DatabaseRegistry::new(dir.path());
        let db = registry.handle("nowhere").unwrap();

        let err = SchemaBuilder::new().create_table(&db, &products()).unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
        assert!(!db.path().exists());
    }
}
