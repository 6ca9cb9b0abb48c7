//! Lens module
//!
//! This module provides high-level "lens" abstractions that combine database
//! operations with request/response shapes. Lenses are designed to be reusable
//! across different interfaces (CLI, REST API, GUI).
//!
//! # Architecture
//!
//! Each lens module exports:
//! - A **Lens struct** (e.g., `DatabaseLens`) - the main entry point for all operations
//! - **Args structs** - input arguments for lens methods
//! - **Output types** - serializable return types
//!
//! ```rust,ignore
//! use schemata::lens::database::{DatabaseLens, TableRefArgs};
//! use schemata::lens::utils::OutputFormat;
//! ```

pub mod utils;

// DatabaseLens - provisioning, table creation, inspection, and reads
pub mod database;
