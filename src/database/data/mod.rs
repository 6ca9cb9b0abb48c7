//! Table data access

mod reader;

pub use reader::{value_to_json, DataReader, Record};
