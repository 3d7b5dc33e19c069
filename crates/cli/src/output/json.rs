//! JSON output formatting.
//!
//! Items are flattened from the wire form (`{"hits": {"N": "12"}}`) into
//! plain JSON (`{"hits": 12}`). Table metadata keeps its wire shape.

use serde_json::{json, Map, Number, Value};

use dynamap::{AttributeValue, Item, ListTablesResult, ScanResult, TableDescription};

/// Converts one attribute to plain JSON.
///
/// Numbers that do not fit a JSON number stay as their decimal text.
pub fn attribute_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(text) => number_json(text).unwrap_or_else(|| Value::String(text.clone())),
    }
}

fn number_json(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::from(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(Value::from(n));
    }
    let n = text.parse::<f64>().ok()?;
    Number::from_f64(n).map(Value::Number)
}

/// Converts an item to a JSON object keyed by attribute name.
pub fn item_json(item: &Item) -> Value {
    let object: Map<String, Value> = item
        .iter()
        .map(|(name, value)| (name.clone(), attribute_json(value)))
        .collect();
    Value::Object(object)
}

/// Format one item.
pub fn format_item(item: &Item) -> String {
    item_json(item).to_string()
}

/// Format a scan page, keeping the paging key.
pub fn format_scan(result: &ScanResult) -> String {
    let mut output = json!({
        "Count": result.count,
        "ScannedCount": result.scanned_count,
        "Items": result.items.iter().map(item_json).collect::<Vec<_>>(),
    });
    if let Some(key) = &result.last_evaluated_key {
        output["LastEvaluatedKey"] = item_json(key);
    }
    output.to_string()
}

/// Format a table listing.
pub fn format_table_names(result: &ListTablesResult) -> String {
    serde_json::to_string(result).unwrap_or_default()
}

/// Format a table description.
pub fn format_table(table: &TableDescription) -> String {
    serde_json::to_string(table).unwrap_or_default()
}
