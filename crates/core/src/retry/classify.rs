use std::fmt;

use serde::Deserialize;

use crate::error::DynamapError;
use crate::wire::THROUGHPUT_EXCEEDED;

/// Why a response is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    ThroughputExceeded,
    InternalError,
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryReason::ThroughputExceeded => f.write_str("provisioned throughput exceeded"),
            RetryReason::InternalError => f.write_str("internal server error"),
        }
    }
}

/// A non-retryable error reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFault {
    pub error_type: String,
    pub message: String,
}

impl From<ServiceFault> for DynamapError {
    fn from(fault: ServiceFault) -> Self {
        DynamapError::Service {
            error_type: fault.error_type,
            message: fault.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Retryable(RetryReason),
    Fatal(ServiceFault),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    message: Option<String>,
    #[serde(rename = "Message")]
    message_title: Option<String>,
}

/// Strips the namespace from an error type such as
/// `com.amazonaws.dynamodb.v20120810#ValidationException`.
fn short_type(error_type: &str) -> &str {
    error_type
        .rsplit_once('#')
        .map_or(error_type, |(_, name)| name)
}

fn parse_fault(status: u16, body: &[u8]) -> ServiceFault {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) if parsed.error_type.is_some() => ServiceFault {
            error_type: parsed
                .error_type
                .as_deref()
                .map(short_type)
                .unwrap_or_default()
                .to_string(),
            message: parsed.message.or(parsed.message_title).unwrap_or_default(),
        },
        _ => ServiceFault {
            error_type: format!("HTTP {status}"),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

/// Sorts a response into success, retryable or fatal.
///
/// 200 succeeds. 500 and a 400 reporting exceeded throughput are retryable.
/// Everything else is a fatal service error.
pub fn classify_response(status: u16, body: &[u8]) -> ResponseClass {
    match status {
        200 => ResponseClass::Success,
        500 => ResponseClass::Retryable(RetryReason::InternalError),
        _ => {
            let fault = parse_fault(status, body);
            if status == 400 && fault.error_type == THROUGHPUT_EXCEEDED {
                ResponseClass::Retryable(RetryReason::ThroughputExceeded)
            } else {
                ResponseClass::Fatal(fault)
            }
        }
    }
}
