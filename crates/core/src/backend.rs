//! The operation contract shared by the remote and in-memory backends.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;
use crate::registry::TableRegistry;
use crate::types::{
    BatchGetItemOptions, BatchGetItemResult, BatchWriteItemOptions, BatchWriteItemResult,
    CreateTableResult, DeleteItemOptions, DeleteItemResult, DeleteTableResult,
    DescribeTableResult, GetItemOptions, GetItemResult, Item, Key, KeysAndAttributes,
    ListTablesOptions, ListTablesResult, ProvisionedThroughput, PutItemOptions, PutItemResult,
    QueryOptions, QueryResult, ScanOptions, ScanResult, TableSchema, UpdateItemOptions,
    UpdateItemResult, UpdateTableResult, WriteRequest,
};

/// A table store addressed by table name.
///
/// Implementations share one [`TableRegistry`] with the application, so call
/// sites do not change when switching backends.
#[async_trait]
pub trait Backend: Send + Sync {
    /// The registry used to map records.
    fn registry(&self) -> &TableRegistry;

    /// Creates a table from a registered schema. Does not wait for it to
    /// become active.
    async fn create_table(&self, schema: &TableSchema) -> Result<CreateTableResult>;

    async fn describe_table(&self, table_name: &str) -> Result<DescribeTableResult>;

    /// Changes the provisioned throughput of a table.
    async fn update_table(
        &self,
        table_name: &str,
        throughput: ProvisionedThroughput,
    ) -> Result<UpdateTableResult>;

    async fn delete_table(&self, table_name: &str) -> Result<DeleteTableResult>;

    async fn list_tables(&self, options: ListTablesOptions) -> Result<ListTablesResult>;

    /// Writes an item, replacing any item with the same key.
    async fn put_item(
        &self,
        table_name: &str,
        item: Item,
        options: PutItemOptions,
    ) -> Result<PutItemResult>;

    async fn get_item(
        &self,
        table_name: &str,
        key: Key,
        options: GetItemOptions,
    ) -> Result<GetItemResult>;

    async fn delete_item(
        &self,
        table_name: &str,
        key: Key,
        options: DeleteItemOptions,
    ) -> Result<DeleteItemResult>;

    async fn update_item(
        &self,
        table_name: &str,
        key: Key,
        options: UpdateItemOptions,
    ) -> Result<UpdateItemResult>;

    async fn scan(&self, table_name: &str, options: ScanOptions) -> Result<ScanResult>;

    async fn query(&self, table_name: &str, options: QueryOptions) -> Result<QueryResult>;

    /// Reads keys from several tables at once.
    async fn batch_get_item(
        &self,
        request_items: HashMap<String, KeysAndAttributes>,
        options: BatchGetItemOptions,
    ) -> Result<BatchGetItemResult>;

    /// Puts and deletes across several tables at once.
    async fn batch_write_item(
        &self,
        request_items: HashMap<String, Vec<WriteRequest>>,
        options: BatchWriteItemOptions,
    ) -> Result<BatchWriteItemResult>;
}

/// Typed helpers over any [`Backend`].
#[async_trait]
pub trait BackendExt: Backend {
    /// Encodes and stores a record.
    ///
    /// Fails locally with `UnknownTable` or `RecordTypeMismatch` unless
    /// `table_name` is registered to `R`.
    async fn put_record<R: Record>(&self, table_name: &str, record: &R) -> Result<PutItemResult> {
        self.registry().check_record::<R>(table_name)?;
        let item = self.registry().to_item(record)?;
        self.put_item(table_name, item, PutItemOptions::default())
            .await
    }

    /// Reads the record whose key fields match those of `key`.
    async fn get_record<R: Record>(&self, table_name: &str, key: &R) -> Result<Option<R>> {
        self.registry().check_record::<R>(table_name)?;
        let key = self.registry().to_key(key)?;
        let result = self
            .get_item(table_name, key, GetItemOptions::default())
            .await?;
        result
            .item
            .map(|item| self.registry().from_item(table_name, &item))
            .transpose()
    }

    /// Deletes the record whose key fields match those of `key`.
    async fn delete_record<R: Record>(&self, table_name: &str, key: &R) -> Result<()> {
        self.registry().check_record::<R>(table_name)?;
        let key = self.registry().to_key(key)?;
        self.delete_item(table_name, key, DeleteItemOptions::default())
            .await?;
        Ok(())
    }

    /// Scans a table and decodes every item.
    async fn scan_records<R: Record>(&self, table_name: &str) -> Result<Vec<R>> {
        self.registry().check_record::<R>(table_name)?;
        let result = self.scan(table_name, ScanOptions::default()).await?;
        result
            .items
            .iter()
            .map(|item| self.registry().from_item(table_name, item))
            .collect()
    }
}

impl<B: Backend + ?Sized> BackendExt for B {}
