//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, listener, lifecycle
//!     → tracing events and spans (request span carries the request ID)
//!     → logging.rs subscriber (compact, pretty or JSON on stdout)
//! ```
//!
//! There is no metrics exporter or log shipping; stdout is collected by
//! whatever runs the process.

pub mod logging;

pub use logging::init_logging;
