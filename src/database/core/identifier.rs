//! Identifier rules
//!
//! Database, table, and column names arrive from callers at runtime and end up
//! inside generated SQL. Everything that is substituted into a statement goes
//! through one of the checks below first.

use crate::error::{DbError, DbResult};

/// Longest accepted name for databases, tables, and columns
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Prefix SQLite reserves for its internal tables
pub const RESERVED_TABLE_PREFIX: &str = "sqlite_";

/// `sqlite_master` condition selecting user tables
///
/// `_` is a LIKE wildcard, so it is escaped to match only the literal prefix.
pub(crate) const USER_TABLE_FILTER: &str = r"type='table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'";

/// SQLite keywords (https://www.sqlite.org/lang_keywords.html)
const SQLITE_KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Check whether a word is an SQLite keyword (case-insensitive)
pub fn is_keyword(word: &str) -> bool {
    SQLITE_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}

/// Validate a database name
///
/// Database names become file names, so only ASCII letters, digits, `_` and `-`
/// are accepted. Keywords are fine here since the name never appears in SQL.
pub fn validate_database_name(name: &str) -> DbResult<()> {
    if name.is_empty() {
        return Err(DbError::validation("Database name is required"));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(DbError::validation(format!(
            "Database name '{}' is longer than {} characters",
            name, MAX_IDENTIFIER_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(DbError::validation(format!(
            "Database name '{}' may only contain letters, digits, '_' and '-'",
            name
        )));
    }
    Ok(())
}

/// Validate a table or column name that will be written unquoted into DDL
///
/// `what` names the kind of identifier for error messages ("Table", "Column").
pub fn validate_identifier(name: &str, what: &str) -> DbResult<()> {
    if name.is_empty() {
        return Err(DbError::validation(format!("{} name is required", what)));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(DbError::validation(format!(
            "{} name '{}' is longer than {} characters",
            what, name, MAX_IDENTIFIER_LEN
        )));
    }

    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DbError::validation(format!(
            "{} name '{}' must start with a letter or '_' and contain only letters, digits and '_'",
            what, name
        )));
    }

    if is_keyword(name) {
        return Err(DbError::validation(format!(
            "{} name '{}' is a reserved SQL keyword",
            what, name
        )));
    }
    Ok(())
}

/// Validate a user table name (identifier rules plus the engine's reserved prefix)
pub fn validate_table_name(name: &str) -> DbResult<()> {
    validate_identifier(name, "Table")?;
    if name.to_ascii_lowercase().starts_with(RESERVED_TABLE_PREFIX) {
        return Err(DbError::validation(format!(
            "Table name '{}' uses the reserved prefix '{}'",
            name, RESERVED_TABLE_PREFIX
        )));
    }
    Ok(())
}

/// Validate a column type token
///
/// Accepts one or more words of `[A-Za-z0-9_]` separated by single spaces, the
/// first starting with a letter, optionally followed by a parenthesised list of
/// one or two signed integers: `INTEGER`, `UNSIGNED BIG INT`, `VARCHAR(255)`,
/// `DECIMAL(10, 2)`. No word may be an SQLite keyword, so constraints such as
/// `PRIMARY KEY` or `DEFAULT` cannot ride along inside the type.
pub fn validate_column_type(column: &str, type_name: &str) -> DbResult<()> {
    let invalid = || {
        DbError::validation(format!(
            "Column '{}' has an invalid type '{}'",
            column, type_name
        ))
    };

    let trimmed = type_name.trim();
    if trimmed.is_empty() {
        return Err(DbError::validation(format!(
            "Column '{}' requires a type",
            column
        )));
    }

    let (words, args) = match trimmed.find('(') {
        Some(open) => {
            let rest = &trimmed[open + 1..];
            let inner = rest.strip_suffix(')').ok_or_else(invalid)?;
            (trimmed[..open].trim_end(), Some(inner))
        }
        None => (trimmed, None),
    };

    if words.is_empty() || words.contains("  ") {
        return Err(invalid());
    }
    let mut first = true;
    for word in words.split(' ') {
        let ok = !word.is_empty()
            && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && (!first || word.starts_with(|c: char| c.is_ascii_alphabetic()))
            && !is_keyword(word);
        if !ok {
            return Err(invalid());
        }
        first = false;
    }

    if let Some(inner) = args {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.is_empty() || parts.len() > 2 {
            return Err(invalid());
        }
        for part in parts {
            let digits = part.strip_prefix(['+', '-']).unwrap_or(part);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
        }
    }
    Ok(())
}

/// Quote an identifier for use in SQL, doubling embedded quotes
///
/// Used on read paths where the table may have been created outside this crate.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_names() {
        assert!(validate_database_name("shop").is_ok());
        assert!(validate_database_name("shop_2024-v1").is_ok());
        assert!(validate_database_name("select").is_ok());

        assert!(validate_database_name("").is_err());
        assert!(validate_database_name("../etc/passwd").is_err());
        assert!(validate_database_name("shop.db").is_err());
        assert!(validate_database_name("my shop").is_err());
        assert!(validate_database_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_identifiers() {
        assert!(validate_identifier("products", "Table").is_ok());
        assert!(validate_identifier("_private", "Table").is_ok());
        assert!(validate_identifier("col_1", "Column").is_ok());

        assert!(validate_identifier("", "Column").is_err());
        assert!(validate_identifier("1col", "Column").is_err());
        assert!(validate_identifier("drop table x", "Table").is_err());
        assert!(validate_identifier("name;--", "Column").is_err());
        assert!(validate_identifier("order", "Column").is_err());
        assert!(validate_identifier("Select", "Table").is_err());
    }

    #[test]
    fn test_reserved_table_prefix() {
        assert!(validate_table_name("sqlite_master").is_err());
        assert!(validate_table_name("SQLITE_custom").is_err());
        assert!(validate_table_name("sqlitefoo").is_ok());
        assert!(validate_table_name("sqlite1").is_ok());
    }

    #[test]
    fn test_error_message_for_missing_name() {
        let err = validate_identifier("", "Table").unwrap_err();
        assert_eq!(err.message(), "Table name is required");
    }

    #[test]
    fn test_column_types() {
        for ty in [
            "INTEGER",
            "TEXT",
            "real",
            "UNSIGNED BIG INT",
            "VARCHAR(255)",
            "DECIMAL(10,2)",
            "DECIMAL(10, 2)",
            "NUMERIC (8)",
            "INT(-1)",
        ] {
            assert!(validate_column_type("c", ty).is_ok(), "{} should be valid", ty);
        }

        for ty in [
            "",
            "   ",
            "TEXT); DROP TABLE x; --",
            "VARCHAR(",
            "VARCHAR(a)",
            "DECIMAL(1,2,3)",
            "INT  EGER",
            "8BIT",
            "TEXT'",
            "VARCHAR(10) NOT NULL",
            "INTEGER PRIMARY KEY",
            "TEXT UNIQUE DEFAULT 5",
            "TEXT NOT NULL",
            "INTEGER REFERENCES other",
            "TEXT COLLATE NOCASE",
            "INTEGER CHECK",
            "INTEGER GENERATED ALWAYS AS",
            "null",
        ] {
            assert!(validate_column_type("c", ty).is_err(), "{} should be invalid", ty);
        }
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("products"), "\"products\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_is_keyword() {
        assert!(is_keyword("table"));
        assert!(is_keyword("PRIMARY"));
        assert!(!is_keyword("products"));
    }
}
