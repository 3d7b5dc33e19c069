//! Retry policy and response classification for the remote transport.
//!
//! Pure functions only; the transport owns the sleeping.

mod classify;
mod policy;

pub use classify::{classify_response, ResponseClass, RetryReason, ServiceFault};
pub use policy::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
