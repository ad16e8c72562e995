//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper connection, Axum router, middleware)
//!     → request.rs (request ID, trace span)
//!     → info / health handlers
//!     → response.rs (faults → 500)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::HandlerError;
pub use server::HttpServer;
