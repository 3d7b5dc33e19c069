//! Pretty output formatting.

use chrono::{DateTime, Utc};

use dynamap::{Item, ListTablesResult, ScanResult, TableDescription};

/// Format an epoch-seconds timestamp.
fn format_timestamp(seconds: f64) -> String {
    let secs = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1e9) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}

/// Format table names for display.
pub fn format_table_names(result: &ListTablesResult) -> String {
    if result.table_names.is_empty() {
        return "No tables found.".to_string();
    }
    let mut output = format!("TABLES ({})\n", result.table_names.len());
    output.push_str(&"-".repeat(40));
    for name in &result.table_names {
        output.push_str(&format!("\n{name}"));
    }
    if let Some(last) = &result.last_evaluated_table_name {
        output.push_str(&format!("\n\nMore tables after: {last}"));
    }
    output
}

/// Format a table description for display.
pub fn format_table(table: &TableDescription) -> String {
    let status = table
        .table_status
        .map(|status| status.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let mut output = format!("{} [{}]", table.table_name, status);
    for element in &table.key_schema {
        let attribute_type = table
            .attribute_definitions
            .iter()
            .find(|definition| definition.attribute_name == element.attribute_name)
            .map(|definition| definition.attribute_type.to_string())
            .unwrap_or_else(|| "?".to_string());
        output.push_str(&format!(
            "\n  {:?} key: {} ({})",
            element.key_type, element.attribute_name, attribute_type
        ));
    }
    if let Some(throughput) = &table.provisioned_throughput {
        output.push_str(&format!(
            "\n  Throughput: {} read / {} write",
            throughput.read_capacity_units, throughput.write_capacity_units
        ));
    }
    if let Some(count) = table.item_count {
        output.push_str(&format!("\n  Items: {count}"));
    }
    if let Some(size) = table.table_size_bytes {
        output.push_str(&format!("\n  Size: {size} bytes"));
    }
    if let Some(created) = table.creation_date_time {
        output.push_str(&format!("\n  Created: {}", format_timestamp(created)));
    }
    output
}

/// Format one item, attributes sorted by name.
pub fn format_item(item: &Item) -> String {
    let mut names: Vec<&String> = item.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| format!("  {name}: {}", item[name]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scan results for display.
pub fn format_scan(result: &ScanResult) -> String {
    if result.items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({} of {} scanned)\n", result.count, result.scanned_count);
    output.push_str(&"-".repeat(40));
    for item in &result.items {
        output.push_str(&format!("\n{}", format_item(item)));
        output.push('\n');
    }
    output
}
