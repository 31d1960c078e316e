//! Error types for Talaria.
//!
//! This module provides the [`TalariaError`] type, the standard error type
//! used throughout the Talaria request boundary.
//!
//! Rather than a hierarchy of error subtypes, every classified failure is a
//! single value carrying an [`ErrorKind`] tag. The transport status code and
//! the machine-readable code are a fixed lookup on the kind, so the response
//! formatter can match on it exhaustively and handler logic can never
//! override the mapping.
//!
//! | Kind | Status | Code |
//! |---|---|---|
//! | `Validation` | 400 | `VALIDATION_ERROR` |
//! | `Unauthorized` | 401 | `UNAUTHORIZED` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `Database` | 500 | `DATABASE_ERROR` |
//! | `Internal` | 500 | `INTERNAL_SERVER_ERROR` |
//!
//! Failures that carry no kind at all (anything propagated as a bare
//! [`anyhow::Error`]) are rendered as `Internal` at the response boundary;
//! they are never silently upgraded to a more specific kind.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type alias using [`TalariaError`].
pub type TalariaResult<T> = Result<T, TalariaError>;

/// Structured detail attached to an error.
///
/// For validation failures the keys are dotted field paths (for example
/// `address.zip`) and the values are per-field messages. Store failures
/// carry the underlying driver error as an opaque string under
/// `originalError`.
pub type Details = serde_json::Map<String, Value>;

/// Classification of a failure, with a fixed transport mapping.
///
/// The taxonomy is closed: five kinds, each with a fixed (status, code)
/// pair. Adding a kind is a breaking change to the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Request validation failed (invalid input, schema mismatch).
    Validation,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Resource not found.
    NotFound,
    /// A persistence collaborator failed.
    Database,
    /// Internal error, including any unclassified failure.
    Internal,
}

impl ErrorKind {
    /// Returns the fixed HTTP status code for this kind.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the fixed machine-readable code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::Database => "DATABASE_ERROR",
            Self::Internal => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// Standard error type for Talaria.
///
/// `TalariaError` is an immutable value: a kind, a human-readable message,
/// and optional structured detail. Construction never fails and the value is
/// only ever inspected by the response formatter, never compared.
///
/// # Example
///
/// ```
/// use talaria_core::{ErrorKind, TalariaError};
///
/// fn load_user(id: &str) -> Result<(), TalariaError> {
///     if id.is_empty() {
///         return Err(TalariaError::not_found("User not found"));
///     }
///     Ok(())
/// }
///
/// let err = load_user("").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TalariaError {
    kind: ErrorKind,
    message: String,
    details: Option<Details>,
}

impl TalariaError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error of the given kind with structured details.
    #[must_use]
    pub fn with_details(kind: ErrorKind, message: impl Into<String>, details: Details) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a validation error with per-field details.
    ///
    /// Keys are dotted field paths, values are the per-field messages.
    #[must_use]
    pub fn validation_with_details(message: impl Into<String>, details: Details) -> Self {
        Self::with_details(ErrorKind::Validation, message, details)
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a database error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Creates a database error wrapping an underlying failure.
    ///
    /// The original error text is preserved as an opaque string under
    /// `originalError` in the details; raw driver errors never leak
    /// beyond it.
    #[must_use]
    pub fn database_with_source(
        message: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        let mut details = Details::new();
        details.insert(
            "originalError".to_string(),
            Value::String(source.to_string()),
        );
        Self::with_details(ErrorKind::Database, message, details)
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured details if present.
    #[must_use]
    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Returns the fixed HTTP status code for this error's kind.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// Returns the fixed machine-readable code for this error's kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}
