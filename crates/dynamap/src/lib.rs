//! dynamap - typed records over a DynamoDB-style table service.
//!
//! Register record types in a [`TableRegistry`], then issue operations by
//! table name through any [`Backend`]: the [`remote::RemoteBackend`] that
//! speaks the JSON protocol over HTTP, or the [`memory::MemoryBackend`]
//! that keeps everything in process.
//!
//! # Feature Flags
//!
//! - `remote` (default): HTTP transport and remote backend, using `reqwest`
//! - `memory` (default): in-memory backend
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dynamap::memory::MemoryBackend;
//! use dynamap::{record, Backend, BackendExt, TableRegistry};
//!
//! record! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct Page {
//!         pub url: String as "URL" => hash,
//!         pub title: String,
//!     }
//! }
//!
//! let registry = Arc::new(TableRegistry::new());
//! let schema = registry.register::<Page>("pages")?;
//! let backend = MemoryBackend::new(registry);
//! backend.create_table(&schema).await?;
//! backend.put_record("pages", &page).await?;
//! ```

pub mod config;
pub mod wait;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "remote")]
pub mod remote;

#[cfg(feature = "remote")]
pub mod transport;

pub use config::ClientConfig;
pub use dynamap_core::*;
pub use wait::wait_until_active;
