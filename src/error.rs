//! Top-level service error.

use thiserror::Error;

use crate::config::ConfigError;
use crate::net::ListenerError;

/// Fatal errors surfaced by startup. `main` reports them and exits non-zero.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("listener error: {0}")]
    Listener(#[from] ListenerError),
}
