//! Request options and results for every table and item operation.
//!
//! Option structs serialize with PascalCase names and omit anything left at
//! its default, so they can be flattened straight into a request envelope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AttributeValue, Item, Key, TableDescription};

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    BeginsWith,
    Between,
}

impl ComparisonOperator {
    /// Number of values the operator compares against.
    pub fn arity(&self) -> usize {
        match self {
            ComparisonOperator::Between => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValues {
    None,
    AllOld,
    UpdatedOld,
    AllNew,
    UpdatedNew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnConsumedCapacity {
    Indexes,
    Total,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnItemCollectionMetrics {
    Size,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Select {
    AllAttributes,
    AllProjectedAttributes,
    SpecificAttributes,
    Count,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeAction {
    #[default]
    Put,
    Delete,
    Add,
}

// ============================================================================
// Building blocks
// ============================================================================

/// A comparison applied to one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    pub attribute_value_list: Vec<AttributeValue>,
    pub comparison_operator: ComparisonOperator,
}

impl Condition {
    pub fn new(comparison_operator: ComparisonOperator, values: Vec<AttributeValue>) -> Self {
        Self {
            attribute_value_list: values,
            comparison_operator,
        }
    }

    pub fn equals(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Eq, vec![value])
    }

    pub fn begins_with(prefix: impl Into<String>) -> Self {
        Self::new(
            ComparisonOperator::BeginsWith,
            vec![AttributeValue::S(prefix.into())],
        )
    }

    pub fn between(low: AttributeValue, high: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Between, vec![low, high])
    }
}

pub type KeyConditions = HashMap<String, Condition>;

/// One attribute change requested by `UpdateItem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeValueUpdate {
    pub action: AttributeAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
}

impl AttributeValueUpdate {
    pub fn put(value: AttributeValue) -> Self {
        Self {
            action: AttributeAction::Put,
            value: Some(value),
        }
    }

    pub fn add(value: AttributeValue) -> Self {
        Self {
            action: AttributeAction::Add,
            value: Some(value),
        }
    }

    pub fn delete() -> Self {
        Self {
            action: AttributeAction::Delete,
            value: None,
        }
    }
}

/// A precondition on an attribute of the stored item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExpectedAttributeValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
}

impl ExpectedAttributeValue {
    /// The attribute must not be present.
    pub fn absent() -> Self {
        Self {
            exists: Some(false),
            value: None,
        }
    }

    /// The attribute must be present and equal to `value`.
    pub fn equals(value: AttributeValue) -> Self {
        Self {
            exists: None,
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConsumedCapacity {
    pub capacity_units: f64,
    pub table_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemCollectionMetrics {
    pub item_collection_key: Key,
    #[serde(rename = "SizeEstimateRangeGB")]
    pub size_estimate_range_gb: Vec<f64>,
}

// ============================================================================
// Table operations
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateTableResult {
    pub table_description: TableDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeTableResult {
    pub table: TableDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UpdateTableResult {
    pub table_description: TableDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeleteTableResult {
    pub table_description: TableDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListTablesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListTablesResult {
    pub table_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_table_name: Option<String>,
}

// ============================================================================
// Item operations
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PutItemOptions {
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub expected: HashMap<String, ExpectedAttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PutItemResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetItemOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetItemResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeleteItemOptions {
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub expected: HashMap<String, ExpectedAttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeleteItemResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UpdateItemOptions {
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attribute_updates: HashMap<String, AttributeValueUpdate>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub expected: HashMap<String, ExpectedAttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
}

impl UpdateItemOptions {
    /// Adds an attribute update.
    pub fn with_update(mut self, attribute: impl Into<String>, update: AttributeValueUpdate) -> Self {
        self.attribute_updates.insert(attribute.into(), update);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UpdateItemResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

// ============================================================================
// Scan and query
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScanOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub scan_filter: KeyConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_segments: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScanResult {
    pub count: usize,
    pub scanned_count: usize,
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct QueryOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub key_conditions: KeyConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    /// Ascending by sort key unless set to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
}

impl QueryOptions {
    /// Adds a key condition.
    pub fn with_condition(mut self, attribute: impl Into<String>, condition: Condition) -> Self {
        self.key_conditions.insert(attribute.into(), condition);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct QueryResult {
    pub count: usize,
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

// ============================================================================
// Batch operations
// ============================================================================

/// The keys to read from one table in a `BatchGetItem` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KeysAndAttributes {
    pub keys: Vec<Key>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

impl KeysAndAttributes {
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchGetItemOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchGetItemResult {
    pub responses: HashMap<String, Vec<Item>>,
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRequest {
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRequest {
    pub key: Key,
}

/// A single put or delete inside a `BatchWriteItem` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WriteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_request: Option<PutRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_request: Option<DeleteRequest>,
}

impl WriteRequest {
    pub fn put(item: Item) -> Self {
        Self {
            put_request: Some(PutRequest { item }),
            delete_request: None,
        }
    }

    pub fn delete(key: Key) -> Self {
        Self {
            put_request: None,
            delete_request: Some(DeleteRequest { key }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchWriteItemOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchWriteItemResult {
    pub unprocessed_items: HashMap<String, Vec<WriteRequest>>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub item_collection_metrics: HashMap<String, Vec<ItemCollectionMetrics>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_options_serialize_empty() {
        assert_eq!(serde_json::to_value(PutItemOptions::default()).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(ScanOptions::default()).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(QueryOptions::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_query_options_wire_shape() {
        let options = QueryOptions {
            limit: Some(10),
            scan_index_forward: Some(false),
            ..Default::default()
        }
        .with_condition("Host", Condition::equals(AttributeValue::S("localhost".to_string())));

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "KeyConditions": {
                    "Host": {
                        "AttributeValueList": [{"S": "localhost"}],
                        "ComparisonOperator": "EQ"
                    }
                },
                "Limit": 10,
                "ScanIndexForward": false
            })
        );
    }

    #[test]
    fn test_update_options_wire_shape() {
        let options = UpdateItemOptions {
            return_values: Some(ReturnValues::UpdatedNew),
            ..Default::default()
        }
        .with_update("Hits", AttributeValueUpdate::add(AttributeValue::N("1".to_string())))
        .with_update("Stale", AttributeValueUpdate::delete());

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "AttributeUpdates": {
                    "Hits": {"Action": "ADD", "Value": {"N": "1"}},
                    "Stale": {"Action": "DELETE"}
                },
                "ReturnValues": "UPDATED_NEW"
            })
        );
    }

    #[test]
    fn test_write_request_wire_shape() {
        let key = Key::from([("URL".to_string(), AttributeValue::S("a".to_string()))]);
        assert_eq!(
            serde_json::to_value(WriteRequest::delete(key)).unwrap(),
            json!({"DeleteRequest": {"Key": {"URL": {"S": "a"}}}})
        );
    }

    #[test]
    fn test_scan_result_decodes_with_missing_fields() {
        let result: ScanResult =
            serde_json::from_str(r#"{"Count": 1, "Items": [{"URL": {"S": "a"}}]}"#).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.scanned_count, 0);
        assert_eq!(result.items.len(), 1);
        assert!(result.last_evaluated_key.is_none());
    }

    #[test]
    fn test_item_collection_metrics_field_name() {
        let metrics: ItemCollectionMetrics =
            serde_json::from_str(r#"{"SizeEstimateRangeGB": [0.0, 1.0]}"#).unwrap();
        assert_eq!(metrics.size_estimate_range_gb, vec![0.0, 1.0]);
    }

    #[test]
    fn test_comparison_operator_arity() {
        assert_eq!(ComparisonOperator::Between.arity(), 2);
        assert_eq!(ComparisonOperator::BeginsWith.arity(), 1);
        assert_eq!(
            serde_json::to_string(&ComparisonOperator::BeginsWith).unwrap(),
            r#""BEGINS_WITH""#
        );
    }
}
