//! In-memory store implementations for tests and local harnesses.
//!
//! [`MemoryKeyValueStore`] keeps items in a table map behind a mutex and
//! matches on attribute values directly — condition and update expression
//! strings are carried but not parsed. [`FailingKeyValueStore`] and the
//! failing mode of [`StaticRelationalStore`] exercise the `Database` error
//! path without a real backend.

use crate::kv::{
    DeleteInput, GetInput, Item, KeyValueStore, PutInput, QueryInput, QueryOutput, ScanInput,
    UpdateInput,
};
use crate::sql::{Connection, QueryResult, RelationalStore, Row};
use crate::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use talaria_core::{TalariaError, TalariaResult};

/// An in-memory [`KeyValueStore`].
///
/// Items are replaced on `put` when they share the configured key
/// attribute; `get`, `update`, and `delete` match items that carry every
/// attribute of the supplied key.
pub struct MemoryKeyValueStore {
    key_attribute: String,
    tables: Mutex<HashMap<String, Vec<Item>>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store keyed on the given attribute name.
    #[must_use]
    pub fn new(key_attribute: impl Into<String>) -> Self {
        Self {
            key_attribute: key_attribute.into(),
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Seeds an item directly, bypassing the trait.
    pub fn seed(&self, table: impl Into<String>, item: Item) {
        self.tables.lock().entry(table.into()).or_default().push(item);
    }

    /// Returns the number of items in a table.
    #[must_use]
    pub fn len(&self, table: &str) -> usize {
        self.tables.lock().get(table).map_or(0, Vec::len)
    }

    /// Returns `true` when a table holds no items.
    #[must_use]
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

fn matches_key(item: &Item, key: &Item) -> bool {
    key.iter().all(|(name, value)| item.get(name) == Some(value))
}

/// Strips the `:` prefix expression values carry in the wire shape.
fn attribute_name(name: &str) -> &str {
    name.strip_prefix(':').unwrap_or(name)
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, params: GetInput) -> BoxFuture<'_, TalariaResult<Option<Item>>> {
        tracing::debug!(table = %params.table_name, "Key-value get operation");
        let tables = self.tables.lock();
        let item = tables
            .get(&params.table_name)
            .and_then(|items| items.iter().find(|item| matches_key(item, &params.key)))
            .cloned();
        Box::pin(async move { Ok(item) })
    }

    fn put(&self, params: PutInput) -> BoxFuture<'_, TalariaResult<()>> {
        tracing::debug!(table = %params.table_name, "Key-value put operation");
        let mut tables = self.tables.lock();
        let items = tables.entry(params.table_name).or_default();
        if let Some(key_value) = params.item.get(&self.key_attribute) {
            items.retain(|item| item.get(&self.key_attribute) != Some(key_value));
        }
        items.push(params.item);
        Box::pin(async move { Ok(()) })
    }

    fn update(&self, params: UpdateInput) -> BoxFuture<'_, TalariaResult<Option<Item>>> {
        tracing::debug!(table = %params.table_name, "Key-value update operation");
        let mut tables = self.tables.lock();
        let updated = tables.get_mut(&params.table_name).and_then(|items| {
            items
                .iter_mut()
                .find(|item| matches_key(item, &params.key))
                .map(|item| {
                    // The update expression is not parsed; every supplied
                    // expression value is applied as a SET.
                    for (name, value) in &params.expression_attribute_values {
                        item.insert(attribute_name(name).to_string(), value.clone());
                    }
                    item.clone()
                })
        });
        Box::pin(async move { Ok(updated) })
    }

    fn delete(&self, params: DeleteInput) -> BoxFuture<'_, TalariaResult<()>> {
        tracing::debug!(table = %params.table_name, "Key-value delete operation");
        let mut tables = self.tables.lock();
        if let Some(items) = tables.get_mut(&params.table_name) {
            items.retain(|item| !matches_key(item, &params.key));
        }
        Box::pin(async move { Ok(()) })
    }

    fn query(&self, params: QueryInput) -> BoxFuture<'_, TalariaResult<QueryOutput>> {
        tracing::debug!(table = %params.table_name, "Key-value query operation");
        let tables = self.tables.lock();
        let condition: Item = params
            .expression_attribute_values
            .iter()
            .map(|(name, value)| (attribute_name(name).to_string(), value.clone()))
            .collect();
        let items: Vec<Item> = tables
            .get(&params.table_name)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| matches_key(item, &condition))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let count = items.len();
        Box::pin(async move { Ok(QueryOutput { items, count }) })
    }

    fn scan(&self, params: ScanInput) -> BoxFuture<'_, TalariaResult<QueryOutput>> {
        tracing::debug!(table = %params.table_name, "Key-value scan operation");
        let tables = self.tables.lock();
        let items: Vec<Item> = tables.get(&params.table_name).cloned().unwrap_or_default();
        let count = items.len();
        Box::pin(async move { Ok(QueryOutput { items, count }) })
    }
}

/// A [`KeyValueStore`] whose every operation fails with a `Database` error,
/// preserving the configured message as `details.originalError`.
pub struct FailingKeyValueStore {
    original_error: String,
}

impl FailingKeyValueStore {
    /// Creates a store that fails with the given underlying error text.
    #[must_use]
    pub fn new(original_error: impl Into<String>) -> Self {
        Self {
            original_error: original_error.into(),
        }
    }

    fn fail<T>(&self, operation: &str) -> BoxFuture<'_, TalariaResult<T>>
    where
        T: Send,
    {
        let error = TalariaError::database_with_source(
            format!("Key-value {operation} operation failed"),
            &self.original_error,
        );
        Box::pin(async move { Err(error) })
    }
}

impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, _params: GetInput) -> BoxFuture<'_, TalariaResult<Option<Item>>> {
        self.fail("get")
    }

    fn put(&self, _params: PutInput) -> BoxFuture<'_, TalariaResult<()>> {
        self.fail("put")
    }

    fn update(&self, _params: UpdateInput) -> BoxFuture<'_, TalariaResult<Option<Item>>> {
        self.fail("update")
    }

    fn delete(&self, _params: DeleteInput) -> BoxFuture<'_, TalariaResult<()>> {
        self.fail("delete")
    }

    fn query(&self, _params: QueryInput) -> BoxFuture<'_, TalariaResult<QueryOutput>> {
        self.fail("query")
    }

    fn scan(&self, _params: ScanInput) -> BoxFuture<'_, TalariaResult<QueryOutput>> {
        self.fail("scan")
    }
}

/// A [`RelationalStore`] returning a canned result, optionally failing.
pub struct StaticRelationalStore {
    result: QueryResult,
    failure: Option<String>,
    closed: AtomicBool,
}

impl StaticRelationalStore {
    /// Creates a store that answers every query with the given rows.
    #[must_use]
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            result: QueryResult {
                row_count: rows.len(),
                rows,
            },
            failure: None,
            closed: AtomicBool::new(false),
        }
    }

    /// Creates a store whose every call fails with the given underlying
    /// error text.
    #[must_use]
    pub fn failing(original_error: impl Into<String>) -> Self {
        Self {
            result: QueryResult::default(),
            failure: Some(original_error.into()),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns `true` once [`RelationalStore::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> TalariaResult<QueryResult> {
        match &self.failure {
            Some(original) => Err(TalariaError::database_with_source(
                "Database query failed",
                original,
            )),
            None => Ok(self.result.clone()),
        }
    }
}

struct StaticConnection {
    result: TalariaResult<QueryResult>,
}

impl Connection for StaticConnection {
    fn query<'a>(
        &'a mut self,
        text: &'a str,
        _params: &'a [Value],
    ) -> BoxFuture<'a, TalariaResult<QueryResult>> {
        tracing::debug!(query = text, "Connection query");
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

impl RelationalStore for StaticRelationalStore {
    fn query<'a>(
        &'a self,
        text: &'a str,
        _params: &'a [Value],
    ) -> BoxFuture<'a, TalariaResult<QueryResult>> {
        tracing::debug!(query = text, "Database query");
        let result = self.outcome();
        Box::pin(async move { result })
    }

    fn get_connection(&self) -> BoxFuture<'_, TalariaResult<Box<dyn Connection>>> {
        match &self.failure {
            Some(original) => {
                let error =
                    TalariaError::database_with_source("Failed to connect to database", original);
                Box::pin(async move { Err(error) })
            }
            None => {
                let connection = StaticConnection {
                    result: Ok(self.result.clone()),
                };
                Box::pin(async move { Ok(Box::new(connection) as Box<dyn Connection>) })
            }
        }
    }

    fn close(&self) -> BoxFuture<'_, TalariaResult<()>> {
        self.closed.store(true, Ordering::SeqCst);
        Box::pin(async move { Ok(()) })
    }
}
