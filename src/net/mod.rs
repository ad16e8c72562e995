//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → connection.rs (lifecycle tracking for shutdown drain)
//!     → Hand off to HTTP layer
//! ```
//!
//! Each connection holds a semaphore permit and a tracker guard until its
//! task ends, whether it finishes, times out or the client goes away.

pub mod connection;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
pub use listener::{ConnectionPermit, Listener, ListenerError};
