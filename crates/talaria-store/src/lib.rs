//! # Talaria Store
//!
//! Narrow async contracts for the persistence collaborators Talaria
//! handlers call: a key-value store ([`KeyValueStore`]) and a relational
//! store ([`RelationalStore`]).
//!
//! The request boundary only needs one guarantee from these collaborators:
//! a call either completes with data or fails with a `Database`-kind
//! [`TalariaError`](talaria_core::TalariaError) whose details carry the
//! underlying failure as an opaque `originalError` string. Connection
//! lifecycle, pooling, and retry are entirely the implementation's concern.
//!
//! Stores are explicitly constructed and injected (no process-wide
//! singletons); their configuration ([`KeyValueConfig`],
//! [`RelationalConfig`]) is built by the process entry point — nothing in
//! this crate reads environment variables.

#![doc(html_root_url = "https://docs.rs/talaria-store/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod kv;
mod memory;
mod sql;

use std::future::Future;
use std::pin::Pin;

/// A boxed future, used to keep the store traits object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use config::{KeyValueConfig, RelationalConfig};
pub use kv::{
    DeleteInput, GetInput, Item, KeyValueStore, PutInput, QueryInput, QueryOutput, ScanInput,
    UpdateInput,
};
pub use memory::{FailingKeyValueStore, MemoryKeyValueStore, StaticRelationalStore};
pub use sql::{Connection, QueryResult, RelationalStore, Row};
