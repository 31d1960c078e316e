//! Key-value store contract.
//!
//! Handlers consume the key-value collaborator through [`KeyValueStore`]
//! only. Implementations must uphold the failure contract: any underlying
//! failure is wrapped as a `Database`-kind
//! [`TalariaError`](talaria_core::TalariaError) with the original error
//! text preserved in `details.originalError`; raw driver errors never
//! cross the trait.

use crate::BoxFuture;
use serde_json::Value;
use talaria_core::TalariaResult;

/// A stored item or key: an attribute-name to value map.
pub type Item = serde_json::Map<String, Value>;

/// Parameters for a `get` operation.
#[derive(Debug, Clone, Default)]
pub struct GetInput {
    /// The table to read from.
    pub table_name: String,
    /// The primary key of the item.
    pub key: Item,
}

/// Parameters for a `put` operation.
#[derive(Debug, Clone, Default)]
pub struct PutInput {
    /// The table to write to.
    pub table_name: String,
    /// The full item to store.
    pub item: Item,
}

/// Parameters for an `update` operation.
#[derive(Debug, Clone, Default)]
pub struct UpdateInput {
    /// The table to update.
    pub table_name: String,
    /// The primary key of the item.
    pub key: Item,
    /// The update expression (e.g. `SET #name = :name`).
    pub update_expression: String,
    /// Values referenced by the update expression.
    pub expression_attribute_values: Item,
}

/// Parameters for a `delete` operation.
#[derive(Debug, Clone, Default)]
pub struct DeleteInput {
    /// The table to delete from.
    pub table_name: String,
    /// The primary key of the item.
    pub key: Item,
}

/// Parameters for a `query` operation.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    /// The table to query.
    pub table_name: String,
    /// The key condition expression (e.g. `pk = :pk`).
    pub key_condition_expression: String,
    /// Values referenced by the key condition expression.
    pub expression_attribute_values: Item,
}

/// Parameters for a `scan` operation.
#[derive(Debug, Clone, Default)]
pub struct ScanInput {
    /// The table to scan.
    pub table_name: String,
}

/// The result of a `query` or `scan`: the matching items and their count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Matching items.
    pub items: Vec<Item>,
    /// Number of matching items.
    pub count: usize,
}

/// The key-value collaborator contract.
///
/// Object-safe so handlers can hold `&dyn KeyValueStore` and tests can
/// substitute doubles without global patching.
pub trait KeyValueStore: Send + Sync {
    /// Reads a single item by key.
    ///
    /// Returns `None` when no item matches.
    fn get(&self, params: GetInput) -> BoxFuture<'_, TalariaResult<Option<Item>>>;

    /// Stores an item, replacing any existing item with the same key.
    fn put(&self, params: PutInput) -> BoxFuture<'_, TalariaResult<()>>;

    /// Applies an update expression to an item, returning the updated item
    /// when one existed.
    fn update(&self, params: UpdateInput) -> BoxFuture<'_, TalariaResult<Option<Item>>>;

    /// Deletes an item by key.
    fn delete(&self, params: DeleteInput) -> BoxFuture<'_, TalariaResult<()>>;

    /// Queries items matching a key condition.
    fn query(&self, params: QueryInput) -> BoxFuture<'_, TalariaResult<QueryOutput>>;

    /// Scans the whole table.
    fn scan(&self, params: ScanInput) -> BoxFuture<'_, TalariaResult<QueryOutput>>;
}
