//! Mapping of per-request faults to HTTP responses.
//!
//! A fault in one request becomes a generic 500 for that request only; the
//! connection task and the listener keep running. Details go to the log, not
//! to the client.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::info::page::RenderError;

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Errors a handler may return.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        internal_error()
    }
}

/// Response for a handler that panicked. Used by the catch-panic layer.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = %message, "Handler panicked");
    internal_error()
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
