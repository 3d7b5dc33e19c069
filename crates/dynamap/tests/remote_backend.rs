mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use dynamap::remote::RemoteBackend;
use dynamap::transport::HttpResponse;
use dynamap::{
    wait_until_active, AttributeValue, Backend, BackendExt, ClientConfig, DynamapError,
    KeysAndAttributes, ListTablesOptions, ProvisionedThroughput, ScanOptions, TableRegistry,
    WriteRequest,
};

use common::{describe_reply, RecordingSender};

dynamap::record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Page {
        pub url: String as "URL" => hash,
        pub title: String,
        pub hits: u64,
    }
}

fn config() -> ClientConfig {
    ClientConfig::from_lookup(|_| None).with_endpoint("http://localhost:8000/")
}

fn remote(replies: Vec<HttpResponse>) -> (RemoteBackend, Arc<RecordingSender>) {
    let registry = Arc::new(TableRegistry::new());
    registry.register::<Page>("pages").unwrap();
    let sender = Arc::new(RecordingSender::new(replies));
    let backend = RemoteBackend::with_sender(registry, sender.clone(), &config());
    (backend, sender)
}

fn url_key(url: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([("URL".to_string(), AttributeValue::S(url.to_string()))])
}

#[tokio::test]
async fn test_create_table_request() {
    let (backend, sender) = remote(vec![describe_reply("pages", "CREATING")]);
    let schema = backend
        .registry()
        .schema("pages")
        .unwrap()
        .with_throughput(5, 2);

    backend.create_table(&schema).await.unwrap();

    let calls = sender.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "DynamoDB_20120810.CreateTable");
    assert_eq!(
        calls[0].1,
        json!({
            "TableName": "pages",
            "AttributeDefinitions": [{"AttributeName": "URL", "AttributeType": "S"}],
            "KeySchema": [{"AttributeName": "URL", "KeyType": "HASH"}],
            "ProvisionedThroughput": {"ReadCapacityUnits": 5, "WriteCapacityUnits": 2}
        })
    );
    assert_eq!(sender.requests()[0].url, "http://localhost:8000/");
}

#[tokio::test]
async fn test_put_record_request() {
    let (backend, sender) = remote(vec![]);
    let page = Page {
        url: "http://localhost/1".to_string(),
        title: String::new(),
        hits: 0,
    };

    backend.put_record("pages", &page).await.unwrap();

    let calls = sender.calls();
    assert_eq!(calls[0].0, "DynamoDB_20120810.PutItem");
    assert_eq!(
        calls[0].1,
        json!({
            "TableName": "pages",
            "Item": {"URL": {"S": "http://localhost/1"}, "hits": {"N": "0"}}
        })
    );
}

#[tokio::test]
async fn test_get_record_decodes_item() {
    let reply = json!({"Item": {"URL": {"S": "http://localhost/1"}, "title": {"S": "Home"}, "hits": {"N": "12"}}});
    let (backend, sender) = remote(vec![HttpResponse::new(200, reply.to_string())]);
    let key = Page {
        url: "http://localhost/1".to_string(),
        ..Default::default()
    };

    let page = backend.get_record("pages", &key).await.unwrap().unwrap();

    assert_eq!(page.title, "Home");
    assert_eq!(page.hits, 12);
    assert_eq!(
        sender.calls()[0].1,
        json!({"TableName": "pages", "Key": {"URL": {"S": "http://localhost/1"}}})
    );
}

#[tokio::test]
async fn test_get_missing_item() {
    let (backend, _) = remote(vec![HttpResponse::new(200, "{}")]);
    let key = Page {
        url: "nope".to_string(),
        ..Default::default()
    };
    assert_eq!(backend.get_record("pages", &key).await.unwrap(), None);
}

#[tokio::test]
async fn test_scan_result_and_request() {
    let reply = json!({
        "Count": 1,
        "ScannedCount": 3,
        "Items": [{"URL": {"S": "http://localhost/1"}}],
        "LastEvaluatedKey": {"URL": {"S": "http://localhost/1"}}
    });
    let (backend, sender) = remote(vec![HttpResponse::new(200, reply.to_string())]);
    let options = ScanOptions {
        limit: Some(1),
        ..Default::default()
    };

    let result = backend.scan("pages", options).await.unwrap();

    assert_eq!(result.count, 1);
    assert_eq!(result.scanned_count, 3);
    assert_eq!(result.last_evaluated_key, Some(url_key("http://localhost/1")));
    assert_eq!(sender.calls()[0].1, json!({"TableName": "pages", "Limit": 1}));
}

#[tokio::test]
async fn test_update_and_list_tables_requests() {
    let (backend, sender) = remote(vec![
        HttpResponse::new(200, "{}"),
        HttpResponse::new(200, r#"{"TableNames":["pages"],"LastEvaluatedTableName":"pages"}"#),
    ]);

    backend
        .update_table("pages", ProvisionedThroughput::new(20, 10))
        .await
        .unwrap();
    let listed = backend
        .list_tables(ListTablesOptions {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.table_names, vec!["pages"]);
    assert_eq!(listed.last_evaluated_table_name.as_deref(), Some("pages"));
    let calls = sender.calls();
    assert_eq!(calls[0].0, "DynamoDB_20120810.UpdateTable");
    assert_eq!(
        calls[0].1,
        json!({"TableName": "pages", "ProvisionedThroughput": {"ReadCapacityUnits": 20, "WriteCapacityUnits": 10}})
    );
    assert_eq!(calls[1].0, "DynamoDB_20120810.ListTables");
    assert_eq!(calls[1].1, json!({"Limit": 1}));
}

#[tokio::test]
async fn test_batch_requests() {
    let (backend, sender) = remote(vec![
        HttpResponse::new(200, r#"{"UnprocessedItems":{}}"#),
        HttpResponse::new(
            200,
            r#"{"Responses":{"pages":[{"URL":{"S":"a"}}]},"UnprocessedKeys":{}}"#,
        ),
    ]);

    backend
        .batch_write_item(
            HashMap::from([(
                "pages".to_string(),
                vec![WriteRequest::put(url_key("a")), WriteRequest::delete(url_key("b"))],
            )]),
            Default::default(),
        )
        .await
        .unwrap();
    let result = backend
        .batch_get_item(
            HashMap::from([("pages".to_string(), KeysAndAttributes::new(vec![url_key("a")]))]),
            Default::default(),
        )
        .await
        .unwrap();

    assert_eq!(result.responses["pages"], vec![url_key("a")]);
    let calls = sender.calls();
    assert_eq!(
        calls[0].1,
        json!({"RequestItems": {"pages": [
            {"PutRequest": {"Item": {"URL": {"S": "a"}}}},
            {"DeleteRequest": {"Key": {"URL": {"S": "b"}}}}
        ]}})
    );
    assert_eq!(
        calls[1].1,
        json!({"RequestItems": {"pages": {"Keys": [{"URL": {"S": "a"}}]}}})
    );
}

#[tokio::test]
async fn test_undecodable_body_is_serialization_error() {
    let (backend, _) = remote(vec![HttpResponse::new(200, r#"{"Table": 7}"#)]);
    let result = backend.describe_table("pages").await;
    assert!(matches!(result, Err(DynamapError::Serialization(_))));
}

#[tokio::test]
async fn test_service_error_surfaces_verbatim() {
    let body = r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"Requested resource not found"}"#;
    let (backend, sender) = remote(vec![HttpResponse::new(400, body)]);

    let result = backend.describe_table("pages").await;

    assert_eq!(
        result,
        Err(DynamapError::service(
            "ResourceNotFoundException",
            "Requested resource not found"
        ))
    );
    assert_eq!(sender.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_active_polls() {
    let (backend, sender) = remote(vec![
        describe_reply("pages", "CREATING"),
        describe_reply("pages", "CREATING"),
        describe_reply("pages", "ACTIVE"),
    ]);

    let description = wait_until_active(&backend, "pages", Duration::from_secs(5), 10)
        .await
        .unwrap();

    assert!(description.is_active());
    assert_eq!(sender.requests().len(), 3);
    assert!(sender
        .calls()
        .iter()
        .all(|(target, _)| target == "DynamoDB_20120810.DescribeTable"));
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_active_times_out() {
    let (backend, sender) = remote(vec![
        describe_reply("pages", "CREATING"),
        describe_reply("pages", "CREATING"),
        describe_reply("pages", "CREATING"),
    ]);

    let result = wait_until_active(&backend, "pages", Duration::from_secs(5), 3).await;

    assert_eq!(
        result,
        Err(DynamapError::TableActivationTimeout {
            table: "pages".to_string(),
        })
    );
    assert_eq!(sender.requests().len(), 3);
}

#[tokio::test]
async fn test_record_helpers_check_registry_before_sending() {
    let (backend, sender) = remote(vec![]);
    let page = Page {
        url: "http://localhost/1".to_string(),
        ..Default::default()
    };

    let put = backend.put_record("never-registered", &page).await;
    let get = backend.get_record("never-registered", &page).await;
    let delete = backend.delete_record("never-registered", &page).await;

    let unknown = DynamapError::UnknownTable("never-registered".to_string());
    assert_eq!(put, Err(unknown.clone()));
    assert_eq!(get, Err(unknown.clone()));
    assert_eq!(delete, Err(unknown));
    assert!(sender.requests().is_empty());
}
