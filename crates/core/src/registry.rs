//! Per-client mapping of table names to record types.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{DynamapError, Result};
use crate::mapper;
use crate::record::Record;
use crate::types::{Item, Key, TableSchema};

type DecodeFn = fn(&Item) -> Result<Box<dyn Any + Send>>;

#[derive(Clone)]
struct Registration {
    schema: TableSchema,
    type_id: TypeId,
    decode: DecodeFn,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("schema", &self.schema)
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

fn decode_boxed<R: Record>(item: &Item) -> Result<Box<dyn Any + Send>> {
    Ok(Box::new(mapper::decode_item::<R>(item)?))
}

/// Table name to (schema, record type) registrations.
///
/// Shared between the application and its backends behind an `Arc`.
/// Registering a name again replaces the earlier entry.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: RwLock<HashMap<String, Registration>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Registration>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Registration>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Derives and stores the schema of `R` under `table_name`.
    ///
    /// The returned schema can be adjusted before creating the table.
    pub fn register<R: Record>(&self, table_name: &str) -> Result<TableSchema> {
        let schema = mapper::derive_schema::<R>(table_name)?;
        tracing::debug!(
            table = %table_name,
            record = R::record_name(),
            "Registered table"
        );
        self.write().insert(
            table_name.to_string(),
            Registration {
                schema: schema.clone(),
                type_id: TypeId::of::<R>(),
                decode: decode_boxed::<R>,
            },
        );
        Ok(schema)
    }

    pub fn schema(&self, table_name: &str) -> Result<TableSchema> {
        self.read()
            .get(table_name)
            .map(|registration| registration.schema.clone())
            .ok_or_else(|| DynamapError::UnknownTable(table_name.to_string()))
    }

    /// Name of the record type registered for `table_name`.
    pub fn record_type(&self, table_name: &str) -> Result<&'static str> {
        self.read()
            .get(table_name)
            .map(|registration| registration.schema.record_type)
            .ok_or_else(|| DynamapError::UnknownTable(table_name.to_string()))
    }

    pub fn is_registered(&self, table_name: &str) -> bool {
        self.read().contains_key(table_name)
    }

    /// Registered table names, sorted.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn to_item<R: Record>(&self, record: &R) -> Result<Item> {
        mapper::to_item(record)
    }

    pub fn to_key<R: Record>(&self, record: &R) -> Result<Key> {
        mapper::to_key(record)
    }

    /// Decodes an item read from `table_name` into `R`.
    ///
    /// Fails if the table is not registered or is registered to another
    /// record type.
    pub fn from_item<R: Record>(&self, table_name: &str, item: &Item) -> Result<R> {
        self.check_record::<R>(table_name)?;
        mapper::decode_item::<R>(item)
    }

    /// Checks that `table_name` is registered to `R`.
    pub fn check_record<R: Record>(&self, table_name: &str) -> Result<()> {
        let tables = self.read();
        let registration = tables
            .get(table_name)
            .ok_or_else(|| DynamapError::UnknownTable(table_name.to_string()))?;
        if registration.type_id != TypeId::of::<R>() {
            return Err(DynamapError::RecordTypeMismatch {
                table: table_name.to_string(),
                registered: registration.schema.record_type,
                requested: R::record_name(),
            });
        }
        Ok(())
    }

    /// Decodes an item into whatever record type `table_name` is registered to.
    pub fn decode_any(&self, table_name: &str, item: &Item) -> Result<Box<dyn Any + Send>> {
        let decode = self
            .read()
            .get(table_name)
            .map(|registration| registration.decode)
            .ok_or_else(|| DynamapError::UnknownTable(table_name.to_string()))?;
        decode(item)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::types::AttributeValue;

    crate::record! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct Page {
            url: String as "URL" => hash,
            title: String,
        }
    }

    crate::record! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct Visit {
            id: u64 => hash,
            at: i64 => range,
        }
    }

    fn page_item() -> Item {
        Item::from([
            ("URL".to_string(), AttributeValue::S("http://localhost/1".to_string())),
            ("title".to_string(), AttributeValue::S("Home".to_string())),
        ])
    }

    #[test]
    fn test_register_returns_schema() {
        let registry = TableRegistry::new();
        let schema = registry.register::<Page>("fetch").unwrap();
        assert_eq!(schema.table_name, "fetch");
        assert_eq!(registry.schema("fetch").unwrap(), schema);
        assert_eq!(registry.record_type("fetch").unwrap(), "Page");
        assert!(registry.is_registered("fetch"));
    }

    #[test]
    fn test_unknown_table() {
        let registry = TableRegistry::new();
        assert_eq!(
            registry.schema("missing"),
            Err(DynamapError::UnknownTable("missing".to_string()))
        );
        assert!(matches!(
            registry.from_item::<Page>("missing", &page_item()),
            Err(DynamapError::UnknownTable(_))
        ));
    }

    #[test]
    fn test_failed_registration_stores_nothing() {
        crate::record! {
            #[derive(Debug, Default)]
            struct Keyless {
                name: String,
            }
        }

        let registry = TableRegistry::new();
        assert!(registry.register::<Keyless>("t").is_err());
        assert!(!registry.is_registered("t"));
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = TableRegistry::new();
        registry.register::<Page>("shared").unwrap();
        registry.register::<Visit>("shared").unwrap();

        assert_eq!(registry.record_type("shared").unwrap(), "Visit");
        assert_eq!(registry.schema("shared").unwrap().key_schema.len(), 2);
        assert_eq!(registry.tables(), vec!["shared".to_string()]);
    }

    #[test]
    fn test_from_item_checks_record_type() {
        let registry = TableRegistry::new();
        registry.register::<Page>("pages").unwrap();

        let page: Page = registry.from_item("pages", &page_item()).unwrap();
        assert_eq!(page.title, "Home");

        assert_eq!(
            registry.from_item::<Visit>("pages", &page_item()),
            Err(DynamapError::RecordTypeMismatch {
                table: "pages".to_string(),
                registered: "Page",
                requested: "Visit",
            })
        );
    }

    #[test]
    fn test_check_record() {
        let registry = TableRegistry::new();
        registry.register::<Page>("pages").unwrap();

        assert_eq!(registry.check_record::<Page>("pages"), Ok(()));
        assert_eq!(
            registry.check_record::<Page>("visits"),
            Err(DynamapError::UnknownTable("visits".to_string()))
        );
        assert!(matches!(
            registry.check_record::<Visit>("pages"),
            Err(DynamapError::RecordTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_any() {
        let registry = TableRegistry::new();
        registry.register::<Page>("pages").unwrap();

        let decoded = registry.decode_any("pages", &page_item()).unwrap();
        let page = decoded.downcast::<Page>().unwrap();
        assert_eq!(page.url, "http://localhost/1");
    }

    #[test]
    fn test_concurrent_registration_and_reads() {
        let registry = Arc::new(TableRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let name = format!("table-{i}");
                    registry.register::<Page>(&name).unwrap();
                    registry.schema(&name).unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.tables().len(), 8);
    }
}
