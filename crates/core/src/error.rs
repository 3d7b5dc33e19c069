use thiserror::Error;

use crate::types::KeyType;

/// Error type returned by the service when a request fails validation.
pub const VALIDATION_EXCEPTION: &str = "ValidationException";
/// Error type returned by the service when an `Expected` condition fails.
pub const CONDITIONAL_CHECK_FAILED: &str = "ConditionalCheckFailedException";
/// Error type returned by the service when creating a table that exists.
pub const RESOURCE_IN_USE: &str = "ResourceInUseException";
/// Error type returned by the service for a missing table.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Errors that can occur while mapping records or talking to a backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DynamapError {
    #[error("Attribute type not supported: field `{field}` is {kind}")]
    UnsupportedAttributeType { field: String, kind: &'static str },

    #[error("No hash key field declared on {record}")]
    MissingHashKey { record: &'static str },

    #[error("{record} declares more than one {role} key field")]
    DuplicateKeyRole { record: &'static str, role: KeyType },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Table {table} is registered to {registered}, not {requested}")]
    RecordTypeMismatch {
        table: String,
        registered: &'static str,
        requested: &'static str,
    },

    #[error("Numeric value {value} does not fit field `{field}`")]
    NumericOverflow { field: String, value: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service error {error_type}: {message}")]
    Service { error_type: String, message: String },

    #[error("Exceeded maximum number of retries ({attempts}) for {action}")]
    RetriesExhausted { action: String, attempts: u32 },

    #[error("Deadline exceeded for {action}")]
    DeadlineExceeded { action: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Timeout waiting for table {table} to become active")]
    TableActivationTimeout { table: String },
}

impl DynamapError {
    /// Builds a service error with the given type and message.
    pub fn service(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Builds a `ValidationException` service error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::service(VALIDATION_EXCEPTION, message)
    }

    /// Returns true if this is a service error of the given type.
    pub fn is_service_error(&self, expected: &str) -> bool {
        matches!(self, Self::Service { error_type, .. } if error_type == expected)
    }
}

impl From<serde_json::Error> for DynamapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for dynamap operations.
pub type Result<T> = std::result::Result<T, DynamapError>;
