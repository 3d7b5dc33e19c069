//! Constants and action names of the JSON wire protocol.

use std::fmt;

/// API version prefix carried in the target header.
pub const API_VERSION: &str = "DynamoDB_20120810";

/// Content type of every request body.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Header naming the invoked action.
pub const TARGET_HEADER: &str = "X-Amz-Target";

/// Error type the service reports when provisioned throughput is exceeded.
pub const THROUGHPUT_EXCEEDED: &str = "ProvisionedThroughputExceededException";

/// Every action the client can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateTable,
    DescribeTable,
    UpdateTable,
    DeleteTable,
    ListTables,
    PutItem,
    GetItem,
    DeleteItem,
    UpdateItem,
    Scan,
    Query,
    BatchGetItem,
    BatchWriteItem,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateTable => "CreateTable",
            Action::DescribeTable => "DescribeTable",
            Action::UpdateTable => "UpdateTable",
            Action::DeleteTable => "DeleteTable",
            Action::ListTables => "ListTables",
            Action::PutItem => "PutItem",
            Action::GetItem => "GetItem",
            Action::DeleteItem => "DeleteItem",
            Action::UpdateItem => "UpdateItem",
            Action::Scan => "Scan",
            Action::Query => "Query",
            Action::BatchGetItem => "BatchGetItem",
            Action::BatchWriteItem => "BatchWriteItem",
        }
    }

    /// Value of the target header for this action.
    pub fn target(&self) -> String {
        format!("{API_VERSION}.{}", self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
