//! IP display service.
//!
//! Reports the caller's `X-Forwarded-For` value, the direct peer address and
//! the request time as an HTML page at `/`, with a liveness probe at
//! `/health` for load balancers.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod info;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
