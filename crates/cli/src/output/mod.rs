//! Output formatting for command results.

pub mod json;
pub mod pretty;

use dynamap::{Item, ListTablesResult, ScanResult, TableDescription};

use crate::cli::OutputFormat;

/// A command result that can be printed in either output format.
pub trait Render {
    fn to_json(&self) -> String;
    fn to_pretty(&self) -> String;
}

impl Render for ListTablesResult {
    fn to_json(&self) -> String {
        json::format_table_names(self)
    }

    fn to_pretty(&self) -> String {
        pretty::format_table_names(self)
    }
}

impl Render for TableDescription {
    fn to_json(&self) -> String {
        json::format_table(self)
    }

    fn to_pretty(&self) -> String {
        pretty::format_table(self)
    }
}

impl Render for Item {
    fn to_json(&self) -> String {
        json::format_item(self)
    }

    fn to_pretty(&self) -> String {
        pretty::format_item(self)
    }
}

impl Render for ScanResult {
    fn to_json(&self) -> String {
        json::format_scan(self)
    }

    fn to_pretty(&self) -> String {
        pretty::format_scan(self)
    }
}

/// Format a command result for output.
pub fn format_output<T: Render>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => value.to_json(),
        OutputFormat::Pretty => value.to_pretty(),
    }
}

#[cfg(test)]
mod tests {
    use dynamap::AttributeValue;

    use super::*;

    #[test]
    fn test_format_output_item() {
        let item = Item::from([("hits".to_string(), AttributeValue::N("7".to_string()))]);

        assert_eq!(format_output(&item, OutputFormat::Json), r#"{"hits":7}"#);
        assert_eq!(format_output(&item, OutputFormat::Pretty), "  hits: N:7");
    }

    #[test]
    fn test_format_output_empty_listing() {
        let result = ListTablesResult::default();

        assert_eq!(
            format_output(&result, OutputFormat::Pretty),
            "No tables found."
        );
        assert!(format_output(&result, OutputFormat::Json).contains("\"TableNames\":[]"));
    }
}
