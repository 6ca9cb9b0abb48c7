pub mod config;
pub mod database;
pub mod table;

use schemata::lens::utils::OutputFormat;
use schemata::{DbError, ErrorKind};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Process exit code for a failed operation
pub(crate) fn exit_code(err: &DbError) -> i32 {
    match err.kind() {
        ErrorKind::Validation => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Schema => 4,
        ErrorKind::Storage => 5,
    }
}

/// Print an operation error and return the matching exit code
pub(crate) fn report_error(err: &DbError) -> i32 {
    eprintln!("ERROR: {}", err);
    exit_code(err)
}

/// Print a value as compact or pretty JSON depending on the format
pub(crate) fn print_json<T: Serialize>(value: &T, output_format: OutputFormat) {
    let result = match output_format {
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value),
        _ => serde_json::to_string(value),
    };
    match result {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
    }
}

/// Print each item on its own line as JSON
pub(crate) fn print_json_lines<T: Serialize>(items: &[T]) {
    for item in items {
        match serde_json::to_string(item) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
    }
}

/// Print rows of text as a table, markdown table, or pipe-separated values
pub(crate) fn print_rows(headers: &[&str], rows: &[Vec<String>], output_format: OutputFormat) {
    match output_format {
        OutputFormat::Psv => {
            println!("{}", headers.join("|"));
            for row in rows {
                println!("{}", row.join("|"));
            }
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().copied());
            for row in rows {
                builder.push_record(row.iter().cloned());
            }

            let mut table = builder.build();
            if output_format == OutputFormat::Markdown {
                table.with(Style::markdown());
            } else {
                table.with(Style::rounded());
            }
            println!("{}", table);
        }
    }
}
