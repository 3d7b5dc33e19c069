mod attribute;
mod operations;
mod table;

pub use attribute::{AttributeType, AttributeValue, Item, Key};
pub use operations::*;
pub use table::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput,
    ProvisionedThroughputDescription, TableDescription, TableSchema, TableStatus,
};
