//! Request envelopes sent by the remote backend.
//!
//! Option structs are flattened in so unset options never reach the wire.

use std::collections::HashMap;

use serde::Serialize;

use dynamap_core::{AttributeDefinition, Item, Key, KeySchemaElement, ProvisionedThroughput};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableRequest<'a> {
    pub table_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableRequest<'a> {
    pub table_name: &'a str,
    pub attribute_definitions: &'a [AttributeDefinition],
    pub key_schema: &'a [KeySchemaElement],
    pub provisioned_throughput: ProvisionedThroughput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTableRequest<'a> {
    pub table_name: &'a str,
    pub provisioned_throughput: ProvisionedThroughput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemRequest<'a, O> {
    pub table_name: &'a str,
    pub item: &'a Item,
    #[serde(flatten)]
    pub options: &'a O,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyRequest<'a, O> {
    pub table_name: &'a str,
    pub key: &'a Key,
    #[serde(flatten)]
    pub options: &'a O,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScopedRequest<'a, O> {
    pub table_name: &'a str,
    #[serde(flatten)]
    pub options: &'a O,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchRequest<'a, T, O> {
    pub request_items: &'a HashMap<String, T>,
    #[serde(flatten)]
    pub options: &'a O,
}
