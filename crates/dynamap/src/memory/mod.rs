//! In-memory backend.
//!
//! Implements the full [`Backend`](dynamap_core::Backend) contract over
//! process-local maps. Tables report `ACTIVE` as soon as they are created.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dynamap::memory::MemoryBackend;
//! use dynamap::TableRegistry;
//!
//! let backend = MemoryBackend::new(Arc::new(TableRegistry::new()));
//! ```

mod backend;
mod condition;
mod table;

pub use backend::MemoryBackend;
