use std::{env, time::Duration};

use dynamap_core::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};

const DEFAULT_REGION: &str = "us-east-1";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service endpoint (default: regional public endpoint)
    pub endpoint: String,
    /// Region used for the default endpoint (default: "us-east-1")
    pub region: String,
    /// Attempts per request before giving up (default: 10)
    pub max_attempts: u32,
    /// Base of the exponential backoff in milliseconds (default: 50)
    pub base_delay_ms: u64,
    /// Optional upper bound on one call in milliseconds
    pub deadline_ms: Option<u64>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMAP_ENDPOINT` - Service endpoint (default: `https://dynamodb.<region>.amazonaws.com/`)
    /// - `AWS_REGION` - Region (default: "us-east-1")
    /// - `DYNAMAP_MAX_ATTEMPTS` - Retry budget (default: 10)
    /// - `DYNAMAP_BASE_DELAY_MS` - Backoff base (default: 50)
    /// - `DYNAMAP_DEADLINE_MS` - Per-call deadline (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let region = lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        Self {
            endpoint: lookup("DYNAMAP_ENDPOINT").unwrap_or_else(|| default_endpoint(&region)),
            max_attempts: lookup("DYNAMAP_MAX_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            base_delay_ms: lookup("DYNAMAP_BASE_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BASE_DELAY.as_millis() as u64),
            deadline_ms: lookup("DYNAMAP_DEADLINE_MS").and_then(|v| v.parse().ok()),
            region,
        }
    }

    /// Sets the endpoint, keeping everything else.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the retry policy for the transport.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms));
        match self.deadline_ms {
            Some(ms) => policy.with_deadline(Duration::from_millis(ms)),
            None => policy,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Public endpoint of a region.
pub fn default_endpoint(region: &str) -> String {
    format!("https://dynamodb.{region}.amazonaws.com/")
}
