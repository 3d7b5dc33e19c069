use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use dynamap_core::error::RESOURCE_IN_USE;
use dynamap_core::{
    Backend, BatchGetItemOptions, BatchGetItemResult, BatchWriteItemOptions,
    BatchWriteItemResult, CreateTableResult, DeleteItemOptions, DeleteItemResult,
    DeleteTableResult, DescribeTableResult, DynamapError, GetItemOptions, GetItemResult, Item,
    Key, KeysAndAttributes, ListTablesOptions, ListTablesResult, ProvisionedThroughput,
    PutItemOptions, PutItemResult, QueryOptions, QueryResult, Result, ReturnValues, ScanOptions,
    ScanResult, TableRegistry, TableSchema, TableStatus, UpdateItemOptions, UpdateItemResult,
    UpdateTableResult, WriteRequest,
};

use super::table::{project, MemoryTable};

type SharedTable = Arc<RwLock<MemoryTable>>;

/// In-memory backend for tests and local development.
///
/// Tables live in `Arc<RwLock<_>>` maps, so clones share the same data.
/// Nothing is persisted and no request ever leaves the process.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    registry: Arc<TableRegistry>,
    tables: Arc<RwLock<HashMap<String, SharedTable>>>,
}

impl MemoryBackend {
    pub fn new(registry: Arc<TableRegistry>) -> Self {
        Self {
            registry,
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn table(&self, table_name: &str) -> Result<SharedTable> {
        self.tables
            .read()
            .await
            .get(table_name)
            .cloned()
            .ok_or_else(|| DynamapError::UnknownTable(table_name.to_string()))
    }
}

/// Put and delete only hand back the previous item.
fn returns_old(return_values: Option<ReturnValues>) -> Result<bool> {
    match return_values {
        None | Some(ReturnValues::None) => Ok(false),
        Some(ReturnValues::AllOld) => Ok(true),
        Some(other) => Err(DynamapError::validation(format!(
            "Return values set to invalid value: {other:?}"
        ))),
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<CreateTableResult> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&schema.table_name) {
            return Err(DynamapError::service(
                RESOURCE_IN_USE,
                format!("Table already exists: {}", schema.table_name),
            ));
        }

        let created_at = Utc::now().timestamp_millis() as f64 / 1000.0;
        let table = MemoryTable::new(schema.clone(), created_at);
        let table_description = table.describe(TableStatus::Active);
        tables.insert(schema.table_name.clone(), Arc::new(RwLock::new(table)));

        tracing::debug!(table = %schema.table_name, "Created in-memory table");
        Ok(CreateTableResult { table_description })
    }

    async fn describe_table(&self, table_name: &str) -> Result<DescribeTableResult> {
        let table = self.table(table_name).await?;
        let table = table.read().await;
        Ok(DescribeTableResult {
            table: table.describe(TableStatus::Active),
        })
    }

    async fn update_table(
        &self,
        table_name: &str,
        throughput: ProvisionedThroughput,
    ) -> Result<UpdateTableResult> {
        let table = self.table(table_name).await?;
        let mut table = table.write().await;
        table.set_throughput(throughput);
        Ok(UpdateTableResult {
            table_description: table.describe(TableStatus::Active),
        })
    }

    async fn delete_table(&self, table_name: &str) -> Result<DeleteTableResult> {
        let removed = self
            .tables
            .write()
            .await
            .remove(table_name)
            .ok_or_else(|| DynamapError::UnknownTable(table_name.to_string()))?;

        tracing::debug!(table = %table_name, "Deleted in-memory table");
        let table = removed.read().await;
        Ok(DeleteTableResult {
            table_description: table.describe(TableStatus::Deleting),
        })
    }

    async fn list_tables(&self, options: ListTablesOptions) -> Result<ListTablesResult> {
        let mut names: Vec<String> = self.tables.read().await.keys().cloned().collect();
        names.sort();

        if let Some(start) = &options.exclusive_start_table_name {
            names.retain(|name| name > start);
        }

        let mut last_evaluated_table_name = None;
        if let Some(limit) = options.limit {
            let limit = limit as usize;
            if names.len() > limit {
                names.truncate(limit);
                last_evaluated_table_name = names.last().cloned();
            }
        }

        Ok(ListTablesResult {
            table_names: names,
            last_evaluated_table_name,
        })
    }

    async fn put_item(
        &self,
        table_name: &str,
        item: Item,
        options: PutItemOptions,
    ) -> Result<PutItemResult> {
        let return_old = returns_old(options.return_values)?;
        let table = self.table(table_name).await?;
        let old = table.write().await.put(item, &options.expected)?;
        Ok(PutItemResult {
            attributes: old.filter(|_| return_old),
            ..Default::default()
        })
    }

    async fn get_item(
        &self,
        table_name: &str,
        key: Key,
        options: GetItemOptions,
    ) -> Result<GetItemResult> {
        let table = self.table(table_name).await?;
        let table = table.read().await;
        let item = table
            .get(&key)?
            .map(|item| project(item, &options.attributes_to_get));
        Ok(GetItemResult {
            item,
            consumed_capacity: None,
        })
    }

    async fn delete_item(
        &self,
        table_name: &str,
        key: Key,
        options: DeleteItemOptions,
    ) -> Result<DeleteItemResult> {
        let return_old = returns_old(options.return_values)?;
        let table = self.table(table_name).await?;
        let old = table.write().await.delete(&key, &options.expected)?;
        Ok(DeleteItemResult {
            attributes: old.filter(|_| return_old),
            ..Default::default()
        })
    }

    async fn update_item(
        &self,
        table_name: &str,
        key: Key,
        options: UpdateItemOptions,
    ) -> Result<UpdateItemResult> {
        let table = self.table(table_name).await?;
        let attributes = table.write().await.update(
            &key,
            &options.attribute_updates,
            &options.expected,
            options.return_values,
        )?;
        Ok(UpdateItemResult {
            attributes,
            ..Default::default()
        })
    }

    async fn scan(&self, table_name: &str, options: ScanOptions) -> Result<ScanResult> {
        let table = self.table(table_name).await?;
        let table = table.read().await;
        let items: Vec<Item> = table
            .scan()
            .map(|item| project(item, &options.attributes_to_get))
            .collect();
        Ok(ScanResult {
            count: items.len(),
            scanned_count: items.len(),
            items,
            last_evaluated_key: None,
            consumed_capacity: None,
        })
    }

    async fn query(&self, table_name: &str, options: QueryOptions) -> Result<QueryResult> {
        let table = self.table(table_name).await?;
        let table = table.read().await;
        table.query(&options)
    }

    async fn batch_get_item(
        &self,
        request_items: HashMap<String, KeysAndAttributes>,
        _options: BatchGetItemOptions,
    ) -> Result<BatchGetItemResult> {
        let mut responses = HashMap::new();
        for (table_name, request) in request_items {
            let table = self.table(&table_name).await?;
            let table = table.read().await;
            let mut items = Vec::new();
            for key in &request.keys {
                if let Some(item) = table.get(key)? {
                    items.push(project(item, &request.attributes_to_get));
                }
            }
            responses.insert(table_name, items);
        }
        Ok(BatchGetItemResult {
            responses,
            ..Default::default()
        })
    }

    async fn batch_write_item(
        &self,
        request_items: HashMap<String, Vec<WriteRequest>>,
        _options: BatchWriteItemOptions,
    ) -> Result<BatchWriteItemResult> {
        let mut resolved = Vec::with_capacity(request_items.len());
        for (table_name, requests) in request_items {
            let table = self.table(&table_name).await?;
            resolved.push((table_name, table, requests));
        }
        // Lock in name order so concurrent batches cannot deadlock.
        resolved.sort_by(|left, right| left.0.cmp(&right.0));

        let mut locked = Vec::with_capacity(resolved.len());
        for (_, table, requests) in &resolved {
            locked.push((table.write().await, requests));
        }

        // The whole batch is rejected before anything is written.
        for (table, requests) in &locked {
            for request in requests.iter() {
                match (&request.put_request, &request.delete_request) {
                    (Some(put), None) => table.validate_item(&put.item)?,
                    (None, Some(delete)) => table.validate_key(&delete.key)?,
                    _ => {
                        return Err(DynamapError::validation(
                            "A write request must contain exactly one of PutRequest or DeleteRequest",
                        ));
                    }
                }
            }
        }

        let no_conditions = HashMap::new();
        for (table, requests) in &mut locked {
            for request in requests.iter() {
                if let Some(put) = &request.put_request {
                    table.put(put.item.clone(), &no_conditions)?;
                } else if let Some(delete) = &request.delete_request {
                    table.delete(&delete.key, &no_conditions)?;
                }
            }
        }

        Ok(BatchWriteItemResult::default())
    }
}
