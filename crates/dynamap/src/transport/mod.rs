//! Resilient request transport.
//!
//! Serializes a payload into the JSON envelope, posts it through an
//! [`HttpSender`] and retries throttled or failed-server responses with
//! exponential backoff. Backoff sleeps only suspend the calling future.

mod http;
mod sender;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use dynamap_core::retry::{classify_response, ResponseClass, RetryPolicy, RetryReason};
use dynamap_core::wire::{Action, CONTENT_TYPE, TARGET_HEADER};
use dynamap_core::{DynamapError, Result};

pub use http::ReqwestSender;
pub use sender::{HttpRequest, HttpResponse, HttpSender, SendError};

/// Result of one attempt.
enum Outcome {
    Succeeded(Vec<u8>),
    Retry(RetryReason),
    Failed(DynamapError),
}

/// Posts actions to one endpoint with a retry policy.
#[derive(Clone)]
pub struct Transport {
    sender: Arc<dyn HttpSender>,
    endpoint: String,
    policy: RetryPolicy,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("endpoint", &self.endpoint)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub fn new(sender: Arc<dyn HttpSender>, endpoint: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            sender,
            endpoint: endpoint.into(),
            policy,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn request(&self, action: Action, body: Vec<u8>) -> HttpRequest {
        HttpRequest {
            method: "POST".to_string(),
            url: self.endpoint.clone(),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
                (TARGET_HEADER.to_string(), action.target()),
            ],
            body,
        }
    }

    /// Sends `payload` as `action` and returns the raw response body.
    pub async fn send<P>(&self, action: Action, payload: &P) -> Result<Vec<u8>>
    where
        P: Serialize + ?Sized + Sync,
    {
        let request = self.request(action, serde_json::to_vec(payload)?);

        match self.policy.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.send_with_retry(action, &request))
                .await
                .map_err(|_| DynamapError::DeadlineExceeded {
                    action: action.to_string(),
                })?,
            None => self.send_with_retry(action, &request).await,
        }
    }

    /// Sends `payload` and decodes the response body as `T`.
    pub async fn call<P, T>(&self, action: Action, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = self.send(action, payload).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn attempt(&self, request: &HttpRequest) -> Outcome {
        let response = match self.sender.send(request.clone()).await {
            Ok(response) => response,
            Err(err) => return Outcome::Failed(DynamapError::Transport(err.to_string())),
        };

        match classify_response(response.status, &response.body) {
            ResponseClass::Success => Outcome::Succeeded(response.body),
            ResponseClass::Retryable(reason) => Outcome::Retry(reason),
            ResponseClass::Fatal(fault) => Outcome::Failed(fault.into()),
        }
    }

    async fn send_with_retry(&self, action: Action, request: &HttpRequest) -> Result<Vec<u8>> {
        let mut attempts = 0;
        loop {
            tracing::debug!(action = %action, attempt = attempts, "Sending request");
            let outcome = self.attempt(request).await;
            attempts += 1;

            match outcome {
                Outcome::Succeeded(body) => return Ok(body),
                Outcome::Failed(err) => return Err(err),
                Outcome::Retry(reason) => {
                    if !self.policy.allows_another(attempts) {
                        return Err(DynamapError::RetriesExhausted {
                            action: action.to_string(),
                            attempts,
                        });
                    }
                    let delay = self.policy.delay_for(attempts - 1);
                    tracing::warn!(
                        action = %action,
                        attempt = attempts,
                        reason = %reason,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
