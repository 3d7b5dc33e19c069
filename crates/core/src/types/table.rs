use std::fmt;

use serde::{Deserialize, Serialize};

use super::AttributeType;

/// Role of an attribute in the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Hash => f.write_str("HASH"),
            KeyType::Range => f.write_str("RANGE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

impl KeySchemaElement {
    pub fn new(attribute_name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            key_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: AttributeType,
}

impl AttributeDefinition {
    pub fn new(attribute_name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            attribute_type,
        }
    }
}

/// Read/write capacity requested for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    pub read_capacity_units: u64,
    pub write_capacity_units: u64,
}

impl ProvisionedThroughput {
    pub fn new(read_capacity_units: u64, write_capacity_units: u64) -> Self {
        Self {
            read_capacity_units,
            write_capacity_units,
        }
    }
}

impl Default for ProvisionedThroughput {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Provisioned throughput as reported by a table description.
///
/// Date-times are UNIX epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProvisionedThroughputDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_decrease_date_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_increase_date_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_decreases_today: Option<u64>,
    pub read_capacity_units: u64,
    pub write_capacity_units: u64,
}

/// Lifecycle state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Creating,
    Updating,
    Deleting,
    Active,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            TableStatus::Creating => "CREATING",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
            TableStatus::Active => "ACTIVE",
            TableStatus::Unknown => "UNKNOWN",
        };
        f.write_str(status)
    }
}

/// A table as described by a backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TableDescription {
    pub attribute_definitions: Vec<AttributeDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughputDescription>,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_status: Option<TableStatus>,
}

impl TableDescription {
    /// Returns true once the table can serve reads and writes.
    pub fn is_active(&self) -> bool {
        self.table_status == Some(TableStatus::Active)
    }
}

/// The schema derived for a registered record type.
///
/// Returned by registration so the caller can adjust throughput before the
/// table is created on a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub provisioned_throughput: ProvisionedThroughput,
    /// Name of the record type the schema was derived from.
    pub record_type: &'static str,
}

impl TableSchema {
    /// Sets the provisioned throughput.
    pub fn with_throughput(mut self, read_capacity_units: u64, write_capacity_units: u64) -> Self {
        self.provisioned_throughput =
            ProvisionedThroughput::new(read_capacity_units, write_capacity_units);
        self
    }

    /// The partition key element.
    pub fn hash_key(&self) -> Option<&KeySchemaElement> {
        self.key_schema
            .iter()
            .find(|element| element.key_type == KeyType::Hash)
    }

    /// The sort key element, if the table has one.
    pub fn range_key(&self) -> Option<&KeySchemaElement> {
        self.key_schema
            .iter()
            .find(|element| element.key_type == KeyType::Range)
    }

    /// Looks up the declared wire type of an attribute.
    pub fn attribute_type(&self, attribute_name: &str) -> Option<AttributeType> {
        self.attribute_definitions
            .iter()
            .find(|definition| definition.attribute_name == attribute_name)
            .map(|definition| definition.attribute_type)
    }

    /// Builds the description a backend would report for this schema.
    pub fn describe(&self, status: TableStatus) -> TableDescription {
        TableDescription {
            attribute_definitions: self.attribute_definitions.clone(),
            creation_date_time: None,
            item_count: None,
            key_schema: self.key_schema.clone(),
            provisioned_throughput: Some(ProvisionedThroughputDescription {
                read_capacity_units: self.provisioned_throughput.read_capacity_units,
                write_capacity_units: self.provisioned_throughput.write_capacity_units,
                ..Default::default()
            }),
            table_name: self.table_name.clone(),
            table_size_bytes: None,
            table_status: Some(status),
        }
    }
}
