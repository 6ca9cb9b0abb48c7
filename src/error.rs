//! Error types for database operations
//!
//! Every operation in [`crate::database`] returns a [`DbResult`]. The variants map
//! one-to-one onto the outward failure classes callers are expected to handle:
//! bad input, a missing database or table, a rejected data-definition statement,
//! and everything else that went wrong underneath (filesystem, engine, locking).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias used across the database layer
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// Required input missing, empty, or outside the allowed character set
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced database or table does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Data-definition statement rejected by the engine
    #[error("schema error: {0}")]
    Schema(String),

    /// Filesystem or engine failure unrelated to the caller's input
    #[error("storage error: {0}")]
    Storage(String),
}

/// Coarse classification of a [`DbError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Schema,
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Schema => write!(f, "schema"),
            ErrorKind::Storage => write!(f, "storage"),
        }
    }
}

impl DbError {
    pub fn validation(message: impl Into<String>) -> Self {
        DbError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DbError::NotFound(message.into())
    }

    pub fn schema(message: impl Into<String>) -> Self {
        DbError::Schema(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DbError::Storage(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Validation(_) => ErrorKind::Validation,
            DbError::NotFound(_) => ErrorKind::NotFound,
            DbError::Schema(_) => ErrorKind::Schema,
            DbError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// HTTP-style status for front ends that expose these operations over a network
    pub fn status_code(&self) -> u16 {
        match self {
            DbError::Validation(_) => 400,
            DbError::NotFound(_) => 404,
            DbError::Schema(_) | DbError::Storage(_) => 500,
        }
    }

    /// Message without the kind prefix, suitable for `{"error": ...}` bodies
    pub fn message(&self) -> &str {
        match self {
            DbError::Validation(m)
            | DbError::NotFound(m)
            | DbError::Schema(m)
            | DbError::Storage(m) => m.as_str(),
        }
    }
}
