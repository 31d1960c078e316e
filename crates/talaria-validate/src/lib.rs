//! # Talaria Validate
//!
//! Declarative schema validation for the Talaria request boundary.
//!
//! [`Schema`] describes the expected shape of untyped input; [`Validator`]
//! checks bodies, query parameters, and path parameters against it and
//! raises `Validation`-kind errors with per-field detail. Violations are
//! always collected exhaustively and undeclared fields are stripped, never
//! rejected.

#![doc(html_root_url = "https://docs.rs/talaria-validate/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod schema;
mod validator;

pub use schema::{CheckOutcome, Schema, Violation};
pub use validator::{Validator, VALIDATION_FAILED_MESSAGE};
