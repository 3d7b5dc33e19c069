//! dynamap_core - pure building blocks for the dynamap table client.
//!
//! Everything in this crate is free of I/O: wire types, the attribute codec,
//! the `Record` capability and entity mapper, the table registry, the shared
//! `Backend` contract and the retry policy used by the remote transport.

pub mod backend;
pub mod codec;
pub mod error;
pub mod mapper;
pub mod record;
pub mod registry;
pub mod retry;
pub mod types;
pub mod wire;

pub use backend::{Backend, BackendExt};
pub use codec::{AttributeField, FieldKind};
pub use error::{DynamapError, Result};
pub use record::{FieldDescriptor, Record};
pub use registry::TableRegistry;
pub use retry::{classify_response, ResponseClass, RetryPolicy, RetryReason, ServiceFault};
pub use types::*;
pub use wire::Action;
