//! Database catalog
//!
//! - `registry`: name → file mapping and enumeration of the storage directory
//! - `provisioner`: creation of new, empty database files

mod provisioner;
mod registry;

pub use provisioner::DatabaseProvisioner;
pub use registry::{
    DatabaseHandle, DatabaseInfo, DatabaseRegistry, DatabaseState, DATABASE_EXTENSION,
};
