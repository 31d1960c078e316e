//! Response envelope formatting.
//!
//! Every invocation produces exactly one [`LambdaResponse`] wrapping one of
//! two stable JSON envelopes:
//!
//! ```json
//! { "success": true,  "data": {}, "timestamp": "..." }
//! { "success": false, "error": { "code": "...", "message": "...",
//!   "details": {}, "requestId": "..." }, "timestamp": "..." }
//! ```
//!
//! The status code of an error envelope is derived solely from the error's
//! [`ErrorKind`]; anything that is not a [`TalariaError`] renders as a 500
//! `INTERNAL_SERVER_ERROR`. Every error render is reported once to the
//! logging sink before being returned; the sink is `tracing`, so the report
//! itself can never fail the response path.

use crate::context::RequestId;
use crate::error::{Details, ErrorKind, TalariaError, TalariaResult};
use chrono::{SecondsFormat, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Fallback message for failures that carry no usable message of their own.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// A complete gateway proxy response: status code, headers, and the
/// serialized envelope body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Serialized JSON envelope.
    pub body: String,
}

impl LambdaResponse {
    /// Parses the envelope body back into JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if the body is not valid
    /// JSON; bodies produced by [`ResponseFormatter`] always are.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Builds the success and error envelopes.
///
/// Both operations are pure apart from the generation-time timestamp and,
/// for errors, the single structured log event.
#[derive(Debug)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Wraps `data` in a success envelope with status 200.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if the payload cannot be serialized to
    /// JSON.
    pub fn success<T: Serialize>(data: &T) -> TalariaResult<LambdaResponse> {
        Self::success_with_status(data, StatusCode::OK)
    }

    /// Wraps `data` in a success envelope with the given status.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if the payload cannot be serialized to
    /// JSON.
    pub fn success_with_status<T: Serialize>(
        data: &T,
        status: StatusCode,
    ) -> TalariaResult<LambdaResponse> {
        let data = serde_json::to_value(data).map_err(|err| {
            TalariaError::internal(format!("Failed to serialize response payload: {err}"))
        })?;

        let body = json!({
            "success": true,
            "data": data,
            "timestamp": timestamp(),
        });

        Ok(LambdaResponse {
            status_code: status.as_u16(),
            headers: default_headers(),
            body: body.to_string(),
        })
    }

    /// Renders any failure as an error envelope.
    ///
    /// A [`TalariaError`] keeps its kind's fixed status and code along with
    /// its message and details; any other error is treated as `Internal`,
    /// using its own message when non-empty. Details are included only when
    /// present and non-empty.
    #[must_use]
    pub fn error(error: &anyhow::Error, request_id: &RequestId) -> LambdaResponse {
        let (status, code, message, details) = match error.downcast_ref::<TalariaError>() {
            Some(typed) => (
                typed.status_code(),
                typed.code(),
                typed.message().to_string(),
                typed.details().cloned(),
            ),
            None => {
                let message = error.to_string();
                let message = if message.is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                (
                    ErrorKind::Internal.status_code(),
                    ErrorKind::Internal.code(),
                    message,
                    None,
                )
            }
        };

        let details: Option<Details> = details.filter(|d| !d.is_empty());

        tracing::error!(
            request_id = %request_id,
            status_code = status.as_u16(),
            error_code = code,
            message = %message,
            details = ?details,
            "Lambda error response"
        );

        let mut error_body = json!({
            "code": code,
            "message": message,
            "requestId": request_id.as_str(),
        });
        if let Some(details) = details {
            error_body["details"] = Value::Object(details);
        }

        let body = json!({
            "success": false,
            "error": error_body,
            "timestamp": timestamp(),
        });

        LambdaResponse {
            status_code: status.as_u16(),
            headers: default_headers(),
            body: body.to_string(),
        }
    }
}

/// Generation-time envelope timestamp, ISO-8601 with milliseconds.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The fixed header set carried by every response.
fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}
