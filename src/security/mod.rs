//! Security subsystem.
//!
//! No authentication and no trust decisions on proxy headers; this only adds
//! response headers that keep per-caller pages out of shared caches.

pub mod headers;
