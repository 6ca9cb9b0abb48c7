//! Common utility functions for lens output
//!
//! This module provides the shared output format selector and helpers for
//! turning dynamic record values into table cells.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default maximum length for a value displayed in a table cell
pub const DEFAULT_CELL_MAX_LEN: usize = 40;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Rounded table (default)
    #[default]
    Table,
    Markdown,
    /// Whole result as one JSON document
    Json,
    JsonPretty,
    /// One JSON value per row
    JsonLine,
    /// Pipe-separated values with a header line
    Psv,
}

const FORMAT_NAMES: &[(&str, OutputFormat)] = &[
    ("table", OutputFormat::Table),
    ("markdown", OutputFormat::Markdown),
    ("json", OutputFormat::Json),
    ("json-pretty", OutputFormat::JsonPretty),
    ("json-line", OutputFormat::JsonLine),
    ("psv", OutputFormat::Psv),
];

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    pub fn name(&self) -> &'static str {
        FORMAT_NAMES
            .iter()
            .find(|(_, format)| format == self)
            .map(|(name, _)| *name)
            .unwrap_or("table")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FORMAT_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, format)| *format)
            .ok_or_else(|| {
                let names: Vec<&str> = FORMAT_NAMES.iter().map(|(name, _)| *name).collect();
                format!("unknown format '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Render a record value as plain cell text
///
/// Strings are shown without quotes, `null` as `NULL`, everything else as JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truncate cell text to the specified length, adding "..." if truncated
pub fn truncate_cell(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!(null)), "NULL");
        assert_eq!(cell_text(&json!("plain")), "plain");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(1.5)), "1.5");
        assert_eq!(cell_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("Short", 20), "Short");
        assert_eq!(
            truncate_cell("This is a very long description", 20),
            "This is a very lo..."
        );
        assert_eq!(truncate_cell("日本語テスト名前これは長い", 10), "日本語テスト名...");
        assert_eq!(truncate_cell("Hello", 3), "...");
    }

    #[test]
    fn test_output_format_names() {
        for (name, format) in FORMAT_NAMES {
            assert_eq!(name.parse::<OutputFormat>().unwrap(), *format);
            assert_eq!(format.to_string(), *name);
        }
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("ndjson".parse::<OutputFormat>().is_err());
        assert!(OutputFormat::JsonLine.is_json());
        assert!(!OutputFormat::Psv.is_json());
    }
}
