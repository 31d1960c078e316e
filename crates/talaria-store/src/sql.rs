//! Relational store contract.
//!
//! Same failure contract as the key-value side: any underlying failure
//! surfaces as a `Database`-kind error with the original text in
//! `details.originalError`. The trait additionally exposes scoped
//! connections ([`Connection`], released on drop on every exit path) and
//! an idempotent [`RelationalStore::close`].

use crate::BoxFuture;
use serde_json::Value;
use talaria_core::TalariaResult;

/// A result row: column name to value.
pub type Row = serde_json::Map<String, Value>;

/// The result of a relational query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Number of rows affected or returned.
    pub row_count: usize,
    /// The returned rows.
    pub rows: Vec<Row>,
}

/// A scoped connection acquired from the pool.
///
/// Dropping the box releases the connection back to the pool; callers
/// never release explicitly, so every exit path (including early `?`
/// returns) releases exactly once.
pub trait Connection: Send {
    /// Runs a query on this connection.
    fn query<'a>(
        &'a mut self,
        text: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, TalariaResult<QueryResult>>;
}

/// The relational collaborator contract.
pub trait RelationalStore: Send + Sync {
    /// Runs a query against the pool.
    fn query<'a>(
        &'a self,
        text: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, TalariaResult<QueryResult>>;

    /// Acquires a scoped connection from the pool.
    fn get_connection(&self) -> BoxFuture<'_, TalariaResult<Box<dyn Connection>>>;

    /// Shuts the pool down. Idempotent; closing twice is not an error.
    fn close(&self) -> BoxFuture<'_, TalariaResult<()>>;
}
