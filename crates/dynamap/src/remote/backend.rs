use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use dynamap_core::{
    Action, Backend, BatchGetItemOptions, BatchGetItemResult, BatchWriteItemOptions,
    BatchWriteItemResult, CreateTableResult, DeleteItemOptions, DeleteItemResult,
    DeleteTableResult, DescribeTableResult, GetItemOptions, GetItemResult, Item, Key,
    KeysAndAttributes, ListTablesOptions, ListTablesResult, ProvisionedThroughput,
    PutItemOptions, PutItemResult, QueryOptions, QueryResult, Result, ScanOptions, ScanResult,
    TableRegistry, TableSchema, UpdateItemOptions, UpdateItemResult, UpdateTableResult,
    WriteRequest,
};

use super::requests::{
    BatchRequest, CreateTableRequest, ItemRequest, KeyRequest, ScopedRequest, TableRequest,
    UpdateTableRequest,
};
use crate::config::ClientConfig;
use crate::transport::{HttpSender, ReqwestSender, Transport};

/// Backend that talks to the table service over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    registry: Arc<TableRegistry>,
    transport: Transport,
}

impl RemoteBackend {
    pub fn new(registry: Arc<TableRegistry>, transport: Transport) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Builds a backend for the configured endpoint with a custom sender.
    pub fn with_sender(
        registry: Arc<TableRegistry>,
        sender: Arc<dyn HttpSender>,
        config: &ClientConfig,
    ) -> Self {
        let transport = Transport::new(sender, config.endpoint.clone(), config.retry_policy());
        Self::new(registry, transport)
    }

    /// Builds a backend that sends unsigned requests with `reqwest`.
    pub fn from_config(registry: Arc<TableRegistry>, config: &ClientConfig) -> Self {
        Self::with_sender(registry, Arc::new(ReqwestSender::new()), config)
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<CreateTableResult> {
        let request = CreateTableRequest {
            table_name: &schema.table_name,
            attribute_definitions: &schema.attribute_definitions,
            key_schema: &schema.key_schema,
            provisioned_throughput: schema.provisioned_throughput,
        };
        tracing::debug!(table = %schema.table_name, "Creating table");
        self.transport.call(Action::CreateTable, &request).await
    }

    async fn describe_table(&self, table_name: &str) -> Result<DescribeTableResult> {
        self.transport
            .call(Action::DescribeTable, &TableRequest { table_name })
            .await
    }

    async fn update_table(
        &self,
        table_name: &str,
        throughput: ProvisionedThroughput,
    ) -> Result<UpdateTableResult> {
        let request = UpdateTableRequest {
            table_name,
            provisioned_throughput: throughput,
        };
        self.transport.call(Action::UpdateTable, &request).await
    }

    async fn delete_table(&self, table_name: &str) -> Result<DeleteTableResult> {
        tracing::debug!(table = %table_name, "Deleting table");
        self.transport
            .call(Action::DeleteTable, &TableRequest { table_name })
            .await
    }

    async fn list_tables(&self, options: ListTablesOptions) -> Result<ListTablesResult> {
        self.transport.call(Action::ListTables, &options).await
    }

    async fn put_item(
        &self,
        table_name: &str,
        item: Item,
        options: PutItemOptions,
    ) -> Result<PutItemResult> {
        let request = ItemRequest {
            table_name,
            item: &item,
            options: &options,
        };
        self.transport.call(Action::PutItem, &request).await
    }

    async fn get_item(
        &self,
        table_name: &str,
        key: Key,
        options: GetItemOptions,
    ) -> Result<GetItemResult> {
        let request = KeyRequest {
            table_name,
            key: &key,
            options: &options,
        };
        self.transport.call(Action::GetItem, &request).await
    }

    async fn delete_item(
        &self,
        table_name: &str,
        key: Key,
        options: DeleteItemOptions,
    ) -> Result<DeleteItemResult> {
        let request = KeyRequest {
            table_name,
            key: &key,
            options: &options,
        };
        self.transport.call(Action::DeleteItem, &request).await
    }

    async fn update_item(
        &self,
        table_name: &str,
        key: Key,
        options: UpdateItemOptions,
    ) -> Result<UpdateItemResult> {
        let request = KeyRequest {
            table_name,
            key: &key,
            options: &options,
        };
        self.transport.call(Action::UpdateItem, &request).await
    }

    async fn scan(&self, table_name: &str, options: ScanOptions) -> Result<ScanResult> {
        let request = ScopedRequest {
            table_name,
            options: &options,
        };
        self.transport.call(Action::Scan, &request).await
    }

    async fn query(&self, table_name: &str, options: QueryOptions) -> Result<QueryResult> {
        let request = ScopedRequest {
            table_name,
            options: &options,
        };
        self.transport.call(Action::Query, &request).await
    }

    async fn batch_get_item(
        &self,
        request_items: HashMap<String, KeysAndAttributes>,
        options: BatchGetItemOptions,
    ) -> Result<BatchGetItemResult> {
        let request = BatchRequest {
            request_items: &request_items,
            options: &options,
        };
        self.transport.call(Action::BatchGetItem, &request).await
    }

    async fn batch_write_item(
        &self,
        request_items: HashMap<String, Vec<WriteRequest>>,
        options: BatchWriteItemOptions,
    ) -> Result<BatchWriteItemResult> {
        let request = BatchRequest {
            request_items: &request_items,
            options: &options,
        };
        self.transport.call(Action::BatchWriteItem, &request).await
    }
}
