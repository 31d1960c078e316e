//! # Talaria
//!
//! **Serverless request boundary toolkit**
//!
//! Talaria is an opinionated toolkit for writing serverless function
//! handlers that behave the same way every time:
//!
//! - 🧭 **Typed Errors** – A five-kind taxonomy with fixed status codes and
//!   machine-readable error codes
//! - 📦 **Stable Envelopes** – Success and error responses share a single
//!   JSON shape with fixed headers
//! - 🛡️ **One Error Boundary** – Handler failures and panics render as
//!   exactly one error envelope, never two and never none
//! - ✅ **Schema Validation** – Collect-all-violations request validation
//!   with unknown-field stripping and defaults
//! - 🗄️ **Injected Persistence** – Object-safe key-value and relational
//!   contracts with in-memory doubles for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use talaria::prelude::*;
//!
//! async fn hello(request: LambdaRequest) -> anyhow::Result<LambdaResponse> {
//!     Ok(ResponseFormatter::success(&serde_json::json!({
//!         "message": "hello",
//!         "requestId": request.context.request_id().as_str(),
//!     }))?)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     talaria::telemetry::init_logging(&LogConfig::default())?;
//!
//!     let handler = FnHandler::new(hello);
//!     let function = FunctionContext::mock();
//!     let response = talaria::boundary::run(&handler, InvocationEvent::default(), &function).await;
//!     println!("{}", response.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Every invocation flows through a single boundary:
//!
//! ```text
//! Event → Boundary → Handler → Success Envelope
//!              ↓ (error / panic)
//!         Error Envelope (status, code, message, requestId, timestamp)
//! ```

#![doc(html_root_url = "https://docs.rs/talaria/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use talaria_core as core;

// Re-export validation types
pub use talaria_validate as validate;

// Re-export persistence contracts
pub use talaria_store as store;

// Re-export telemetry types
pub use talaria_telemetry as telemetry;

// Re-export the boundary entry point at the crate root
pub use talaria_core::boundary;

pub mod demo;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use talaria::prelude::*;
/// ```
pub mod prelude {
    pub use talaria_core::{
        ErrorKind, FnHandler, FunctionContext, Handler, InvocationEvent, LambdaRequest,
        LambdaResponse, RequestContext, RequestId, ResponseFormatter, TalariaError, TalariaResult,
    };

    // Re-export validation types
    pub use talaria_validate::{Schema, Validator, Violation};

    // Re-export persistence contracts
    pub use talaria_store::{KeyValueStore, RelationalStore};

    // Re-export logging setup
    pub use talaria_telemetry::{init_logging, LogConfig};
}
