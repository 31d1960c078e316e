//! Request context types.
//!
//! The [`RequestContext`] carries per-invocation metadata from the boundary
//! into handlers. It is built once when the boundary is entered, read-only
//! downstream, and discarded once the response is produced.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque per-invocation request identifier.
///
/// The identifier is supplied by the invocation environment and is treated
/// as an opaque string; Talaria never parses it. [`RequestId::generate`]
/// exists for tests and local harnesses where no environment id is
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a request id from the environment-supplied string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh request id (UUID v7, time-ordered).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// What the invocation environment hands the function alongside the event.
///
/// This is the narrow slice of the runtime's own context that the boundary
/// consumes: the request id and the function name.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    request_id: RequestId,
    function_name: String,
}

impl FunctionContext {
    /// Creates a function context from the environment-supplied values.
    #[must_use]
    pub fn new(request_id: RequestId, function_name: impl Into<String>) -> Self {
        Self {
            request_id,
            function_name: function_name.into(),
        }
    }

    /// Creates a mock context for tests, with a generated request id.
    #[must_use]
    pub fn mock() -> Self {
        Self::new(RequestId::generate(), "talaria-test")
    }

    /// Returns the request id.
    #[must_use]
    pub const fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Returns the function name.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }
}

/// Per-invocation context visible to handlers.
///
/// Created once per invocation by the request boundary, stamped with the
/// time the boundary was entered. Never persisted and never shared across
/// invocations.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    function_name: String,
    timestamp: DateTime<Utc>,
    user_id: Option<String>,
}

impl RequestContext {
    /// Builds a request context from the invocation environment's context,
    /// stamped with the current time.
    #[must_use]
    pub fn from_invocation(function: &FunctionContext) -> Self {
        Self {
            request_id: function.request_id.clone(),
            function_name: function.function_name.clone(),
            timestamp: Utc::now(),
            user_id: None,
        }
    }

    /// Creates a mock context for testing purposes.
    #[must_use]
    pub fn mock() -> Self {
        Self::from_invocation(&FunctionContext::mock())
    }

    /// Returns a new context with the specified user id.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Returns the request id.
    #[must_use]
    pub const fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Returns the function name.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Returns the time the boundary was entered.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the entry timestamp as an ISO-8601 string.
    #[must_use]
    pub fn timestamp_iso8601(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns the user id if one was attached.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
