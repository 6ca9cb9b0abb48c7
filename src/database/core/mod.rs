//! Core database infrastructure
//!
//! This module provides the foundational pieces shared by all database operations:
//! - `DatabaseConn`: scoped SQLite connection wrapper with per-open configuration
//! - `ConnectionOptions`: settings applied to every connection (busy timeout)
//! - `identifier`: validation and quoting of runtime-supplied names

mod connection;
pub mod identifier;

pub use connection::{ConnectionOptions, DatabaseConn, DEFAULT_BUSY_TIMEOUT};
pub(crate) use connection::read_error;
