//! Example business handler.
//!
//! Not part of the hard core: this handler exists to pin down the contract
//! the boundary supports — validate input through the adapter, call the
//! persistence collaborators, and return a formatted envelope. It also
//! documents the partial-failure policy explicitly: store lookups here are
//! best-effort and a collaborator outage downgrades them to "no data"
//! instead of failing the whole request.

use serde_json::json;
use std::sync::Arc;
use talaria_core::{Handler, LambdaRequest, LambdaResponse, ResponseFormatter};
use talaria_store::{KeyValueStore, QueryInput, RelationalStore};
use talaria_validate::{Schema, Validator};

/// A handler mirroring a typical read-mostly endpoint.
pub struct DemoHandler {
    kv: Arc<dyn KeyValueStore>,
    sql: Arc<dyn RelationalStore>,
    table_name: String,
}

impl DemoHandler {
    /// Creates the handler with its injected collaborators.
    #[must_use]
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        sql: Arc<dyn RelationalStore>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            kv,
            sql,
            table_name: table_name.into(),
        }
    }

    fn body_schema() -> Schema {
        Schema::object(vec![
            ("name", Schema::string().required()),
            ("email", Schema::string().email().required()),
        ])
    }
}

impl Handler for DemoHandler {
    async fn handle(&self, request: LambdaRequest) -> anyhow::Result<LambdaResponse> {
        let LambdaRequest { event, context } = request;

        // Validate the request body when one is present. A validation
        // failure propagates and renders as a 400 at the boundary; a body
        // that is not JSON at all propagates as an internal error.
        if event.body.is_some() {
            let body = event.json_body()?.unwrap_or(serde_json::Value::Null);
            let validated = Validator::validate_body(&Self::body_schema(), &body)?;
            tracing::info!(
                request_id = %context.request_id(),
                validated = %validated,
                "Request body validated"
            );
        }

        // Best-effort lookup: a key-value outage is logged and swallowed,
        // the request continues without that data.
        let query = QueryInput {
            table_name: self.table_name.clone(),
            key_condition_expression: "pk = :pk".to_string(),
            expression_attribute_values: [(":pk".to_string(), json!("example-key"))]
                .into_iter()
                .collect(),
        };
        match self.kv.query(query).await {
            Ok(output) => {
                tracing::info!(item_count = output.count, "Key-value query result");
            }
            Err(error) => {
                tracing::warn!(error = %error, "Key-value query failed");
            }
        }

        // Same policy for the relational side.
        match self.sql.query("SELECT * FROM users LIMIT 10", &[]).await {
            Ok(result) => {
                tracing::info!(row_count = result.row_count, "Relational query executed");
            }
            Err(error) => {
                tracing::warn!(error = %error, "Relational query failed");
            }
        }

        Ok(ResponseFormatter::success(&json!({
            "message": "Request processed successfully",
            "requestId": context.request_id().as_str(),
        }))?)
    }
}
