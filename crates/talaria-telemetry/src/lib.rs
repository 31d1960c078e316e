//! # Talaria Telemetry
//!
//! Structured logging for Talaria services: JSON logs via the
//! tracing-subscriber ecosystem, initialized once by the process entry
//! point.

#![doc(html_root_url = "https://docs.rs/talaria-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};

/// Result type alias using [`TelemetryError`].
pub type TelemetryResult<T> = Result<T, TelemetryError>;
