//! Invocation event types.
//!
//! [`InvocationEvent`] is the gateway proxy event shape the boundary
//! consumes. Only the fields the boundary and handlers actually read are
//! modeled; everything else in the upstream event is ignored during
//! deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An inbound gateway proxy event.
///
/// Field names follow the upstream wire format (`httpMethod`, `path`,
/// `queryStringParameters`, ...). All fields are optional: direct
/// invocations carry none of the HTTP metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvocationEvent {
    /// HTTP method, when invoked through a gateway.
    pub http_method: Option<String>,
    /// Request path, when invoked through a gateway.
    pub path: Option<String>,
    /// Raw request body, if any.
    pub body: Option<String>,
    /// Query string parameters.
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Path parameters extracted by the gateway.
    pub path_parameters: Option<HashMap<String, String>>,
    /// Request headers.
    pub headers: Option<HashMap<String, String>>,
}

impl InvocationEvent {
    /// Creates an event builder.
    #[must_use]
    pub fn builder() -> InvocationEventBuilder {
        InvocationEventBuilder::default()
    }

    /// Parses the raw body as JSON, if a body is present.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when a body is present but
    /// is not valid JSON. Handlers that propagate it unchanged will see it
    /// rendered as an internal error at the boundary.
    pub fn json_body(&self) -> Result<Option<Value>, serde_json::Error> {
        self.body
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
}

/// Builder for creating [`InvocationEvent`] values in tests and harnesses.
#[derive(Debug, Default)]
pub struct InvocationEventBuilder {
    http_method: Option<String>,
    path: Option<String>,
    body: Option<String>,
    query_string_parameters: Option<HashMap<String, String>>,
    path_parameters: Option<HashMap<String, String>>,
    headers: Option<HashMap<String, String>>,
}

impl InvocationEventBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.http_method = Some(method.into());
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body from a serializable value.
    ///
    /// # Panics
    ///
    /// Panics if the value cannot be serialized; intended for tests.
    #[must_use]
    pub fn json_body<T: Serialize>(self, value: &T) -> Self {
        self.body(serde_json::to_string(value).expect("test body should serialize"))
    }

    /// Adds a query string parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Builds the event.
    #[must_use]
    pub fn build(self) -> InvocationEvent {
        InvocationEvent {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query_string_parameters: self.query_string_parameters,
            path_parameters: self.path_parameters,
            headers: self.headers,
        }
    }
}
