//! Conversion between records and the item/key maps sent to a backend.

use crate::error::{DynamapError, Result};
use crate::record::Record;
use crate::types::{
    AttributeDefinition, AttributeValue, Item, Key, KeySchemaElement, KeyType,
    ProvisionedThroughput, TableSchema,
};

/// Derives the table schema of a record type.
///
/// Fails if any field has a kind with no wire type, if no field is marked
/// `hash`, or if a key role is declared twice.
pub fn derive_schema<R: Record>(table_name: &str) -> Result<TableSchema> {
    let record = R::record_name();
    let mut hash = None;
    let mut range = None;
    let mut attribute_definitions = Vec::new();

    for field in R::FIELDS {
        let attribute_type = field
            .kind
            .attribute_type()
            .ok_or_else(|| field.kind.unsupported(field.name))?;

        let Some(role) = field.role else {
            continue;
        };
        let slot = match role {
            KeyType::Hash => &mut hash,
            KeyType::Range => &mut range,
        };
        if slot.is_some() {
            return Err(DynamapError::DuplicateKeyRole { record, role });
        }
        *slot = Some(field.name);
        attribute_definitions.push(AttributeDefinition::new(field.name, attribute_type));
    }

    let hash = hash.ok_or(DynamapError::MissingHashKey { record })?;
    let mut key_schema = vec![KeySchemaElement::new(hash, KeyType::Hash)];
    if let Some(range) = range {
        key_schema.push(KeySchemaElement::new(range, KeyType::Range));
    }

    Ok(TableSchema {
        table_name: table_name.to_string(),
        key_schema,
        attribute_definitions,
        provisioned_throughput: ProvisionedThroughput::default(),
        record_type: record,
    })
}

/// Encodes every field of a record. Empty strings are omitted.
pub fn to_item<R: Record>(record: &R) -> Result<Item> {
    let mut item = Item::new();
    for field in R::FIELDS {
        if let Some(value) = record.encode_field(field.name)? {
            item.insert(field.name.to_string(), value);
        }
    }
    Ok(item)
}

/// Encodes only the key fields of a record.
pub fn to_key<R: Record>(record: &R) -> Result<Key> {
    let mut key = Key::new();
    for field in R::FIELDS.iter().filter(|field| field.is_key()) {
        if let Some(value) = record.encode_field(field.name)? {
            key.insert(field.name.to_string(), value);
        }
    }
    Ok(key)
}

/// Builds a record from an item, starting from `R::default()`.
///
/// Attributes that match no field are ignored.
pub fn decode_item<R: Record>(item: &Item) -> Result<R> {
    let mut record = R::default();
    for (name, value) in item {
        record.decode_field(name, value)?;
    }
    Ok(record)
}

/// Projects an item onto a key schema.
pub fn key_of(key_schema: &[KeySchemaElement], item: &Item) -> Result<Key> {
    key_schema
        .iter()
        .map(|element| {
            item.get(&element.attribute_name)
                .map(|value| (element.attribute_name.clone(), value.clone()))
                .ok_or_else(|| {
                    DynamapError::validation(format!(
                        "One of the required keys was not given a value: {}",
                        element.attribute_name
                    ))
                })
        })
        .collect()
}

/// Encodes a key as a stable identity string.
///
/// The key must name exactly the schema's key attributes with their
/// declared types.
pub fn encode_key(schema: &TableSchema, key: &Key) -> Result<String> {
    if key.len() != schema.key_schema.len() {
        return Err(DynamapError::validation(
            "The provided key element does not match the schema",
        ));
    }

    let mut parts: Vec<&AttributeValue> = Vec::with_capacity(schema.key_schema.len());
    for element in &schema.key_schema {
        let value = key.get(&element.attribute_name).ok_or_else(|| {
            DynamapError::validation("The provided key element does not match the schema")
        })?;
        if let Some(expected) = schema.attribute_type(&element.attribute_name) {
            if value.attribute_type() != expected {
                return Err(DynamapError::validation(format!(
                    "Type mismatch for key {}: expected {expected}",
                    element.attribute_name
                )));
            }
        }
        parts.push(value);
    }

    Ok(serde_json::to_string(&parts)?)
}
