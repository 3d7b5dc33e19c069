//! Remote backend over the resilient transport.
//!
//! Every operation builds a `{TableName, ...}` request, sends it as the
//! matching action and decodes the response body into the typed result.
//! Table creation does not wait for the table to become active; see
//! [`wait_until_active`](crate::wait::wait_until_active).

mod backend;
mod requests;

pub use backend::RemoteBackend;
