//! # Talaria Core
//!
//! Core types for the Talaria serverless request boundary.
//!
//! This crate provides the foundational types used throughout Talaria:
//!
//! - [`TalariaError`] / [`ErrorKind`] - The closed, typed error taxonomy
//! - [`RequestContext`] / [`RequestId`] - Per-invocation context
//! - [`InvocationEvent`] - The inbound gateway proxy event
//! - [`ResponseFormatter`] / [`LambdaResponse`] - The stable response envelopes
//! - [`Handler`] - The business-logic contract
//! - [`boundary::run`] - The single error-handling chokepoint

#![doc(html_root_url = "https://docs.rs/talaria-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod boundary;
mod context;
mod error;
mod event;
mod handler;
mod response;

pub use context::{FunctionContext, RequestContext, RequestId};
pub use error::{Details, ErrorKind, TalariaError, TalariaResult};
pub use event::{InvocationEvent, InvocationEventBuilder};
pub use handler::{FnHandler, Handler, LambdaRequest};
pub use response::{LambdaResponse, ResponseFormatter, DEFAULT_ERROR_MESSAGE};
