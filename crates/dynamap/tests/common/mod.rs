//! Test senders shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use dynamap::memory::MemoryBackend;
use dynamap::transport::{HttpRequest, HttpResponse, HttpSender, SendError};
use dynamap::{
    AttributeDefinition, Backend, DynamapError, KeySchemaElement, ProvisionedThroughput,
    TableSchema,
};

/// Serves wire requests from an in-memory backend, the way a local
/// service emulator would.
pub struct LoopbackSender {
    pub backend: MemoryBackend,
}

fn field<T: DeserializeOwned>(body: &Value, name: &str) -> Result<T, DynamapError> {
    serde_json::from_value(body.get(name).cloned().unwrap_or(Value::Null))
        .map_err(|e| DynamapError::validation(format!("{name}: {e}")))
}

fn options<T: DeserializeOwned>(body: &Value) -> Result<T, DynamapError> {
    serde_json::from_value(body.clone()).map_err(|e| DynamapError::validation(e.to_string()))
}

fn ok<T: Serialize>(result: T) -> Result<Value, DynamapError> {
    serde_json::to_value(result).map_err(DynamapError::from)
}

impl LoopbackSender {
    async fn dispatch(&self, action: &str, body: Value) -> Result<Value, DynamapError> {
        let backend = &self.backend;
        match action {
            "CreateTable" => {
                let schema = TableSchema {
                    table_name: field(&body, "TableName")?,
                    key_schema: field::<Vec<KeySchemaElement>>(&body, "KeySchema")?,
                    attribute_definitions: field::<Vec<AttributeDefinition>>(
                        &body,
                        "AttributeDefinitions",
                    )?,
                    provisioned_throughput: field(&body, "ProvisionedThroughput")?,
                    record_type: "Item",
                };
                ok(backend.create_table(&schema).await?)
            }
            "DescribeTable" => {
                let name: String = field(&body, "TableName")?;
                ok(backend.describe_table(&name).await?)
            }
            "UpdateTable" => {
                let name: String = field(&body, "TableName")?;
                let throughput: ProvisionedThroughput = field(&body, "ProvisionedThroughput")?;
                ok(backend.update_table(&name, throughput).await?)
            }
            "DeleteTable" => {
                let name: String = field(&body, "TableName")?;
                ok(backend.delete_table(&name).await?)
            }
            "ListTables" => ok(backend.list_tables(options(&body)?).await?),
            "PutItem" => {
                let name: String = field(&body, "TableName")?;
                ok(backend
                    .put_item(&name, field(&body, "Item")?, options(&body)?)
                    .await?)
            }
            "GetItem" => {
                let name: String = field(&body, "TableName")?;
                ok(backend
                    .get_item(&name, field(&body, "Key")?, options(&body)?)
                    .await?)
            }
            "DeleteItem" => {
                let name: String = field(&body, "TableName")?;
                ok(backend
                    .delete_item(&name, field(&body, "Key")?, options(&body)?)
                    .await?)
            }
            "UpdateItem" => {
                let name: String = field(&body, "TableName")?;
                ok(backend
                    .update_item(&name, field(&body, "Key")?, options(&body)?)
                    .await?)
            }
            "Scan" => {
                let name: String = field(&body, "TableName")?;
                ok(backend.scan(&name, options(&body)?).await?)
            }
            "Query" => {
                let name: String = field(&body, "TableName")?;
                ok(backend.query(&name, options(&body)?).await?)
            }
            "BatchGetItem" => ok(backend
                .batch_get_item(field(&body, "RequestItems")?, options(&body)?)
                .await?),
            "BatchWriteItem" => ok(backend
                .batch_write_item(field(&body, "RequestItems")?, options(&body)?)
                .await?),
            other => Err(DynamapError::validation(format!("Unknown action {other}"))),
        }
    }
}

fn error_response(err: DynamapError) -> HttpResponse {
    let (error_type, message) = match err {
        DynamapError::Service {
            error_type,
            message,
        } => (error_type, message),
        DynamapError::UnknownTable(name) => (
            "ResourceNotFoundException".to_string(),
            format!("Requested resource not found: Table: {name} not found"),
        ),
        other => ("InternalServerError".to_string(), other.to_string()),
    };
    let body = json!({
        "__type": format!("com.amazonaws.dynamodb.v20120810#{error_type}"),
        "message": message,
    });
    HttpResponse::new(400, body.to_string())
}

#[async_trait]
impl HttpSender for LoopbackSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SendError> {
        let action = request
            .header("X-Amz-Target")
            .and_then(|target| target.strip_prefix("DynamoDB_20120810."))
            .ok_or_else(|| SendError::new("missing target header"))?
            .to_string();
        let body: Value =
            serde_json::from_slice(&request.body).map_err(|e| SendError::new(e.to_string()))?;

        Ok(match self.dispatch(&action, body).await {
            Ok(value) => HttpResponse::new(200, value.to_string()),
            Err(err) => error_response(err),
        })
    }
}

/// Replies from a fixed script and records the requests it receives.
#[derive(Default)]
pub struct RecordingSender {
    replies: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingSender {
    pub fn new(replies: Vec<HttpResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Target header and decoded body of every request, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.requests()
            .iter()
            .map(|request| {
                (
                    request.header("X-Amz-Target").unwrap_or_default().to_string(),
                    serde_json::from_slice(&request.body).unwrap(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl HttpSender for RecordingSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SendError> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, "{}")))
    }
}

/// Describes a table in the given status, as the service would.
pub fn describe_reply(table: &str, status: &str) -> HttpResponse {
    let body = json!({
        "Table": {
            "AttributeDefinitions": [{"AttributeName": "URL", "AttributeType": "S"}],
            "KeySchema": [{"AttributeName": "URL", "KeyType": "HASH"}],
            "TableName": table,
            "TableStatus": status,
        }
    });
    HttpResponse::new(200, body.to_string())
}
