//! HTTP server setup and connection loop.
//!
//! # Responsibilities
//! - Create the Axum router with both handlers
//! - Wire up middleware (request ID, tracing, panic isolation, timeout, headers)
//! - Accept connections and serve each one (HTTP/1.1) on its own task
//! - Apply the header-read timeout to slow or idle connections
//! - Drain live connections on shutdown

use std::time::Duration;

use axum::{extract::ConnectInfo, routing::get, Extension, Router};
use hyper::server::conn::http1;
use hyper_util::{
    rt::{TokioIo, TokioTimer},
    service::TowerToHyperService,
};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, watch};
use tower::{Layer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Instrument;

use crate::config::ServiceConfig;
use crate::health::handle_health;
use crate::http::request::{make_request_span, UuidRequestId, X_REQUEST_ID};
use crate::http::response::handle_panic;
use crate::info::handle_index;
use crate::net::{ConnectionGuard, ConnectionPermit, ConnectionTracker, Listener, ListenerError};
use crate::security::headers::{no_store_layer, nosniff_layer};

/// Pause after a failed accept (e.g. EMFILE) before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// HTTP server for the info and health endpoints.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    tracker: ConnectionTracker,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let router = Self::build_router(&config);
        Self {
            router,
            config,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Unknown paths and methods fall through to Axum's default 404/405.
    fn build_router(config: &ServiceConfig) -> Router {
        let routes = Router::new()
            .route("/", get(handle_index))
            .route("/health", get(handle_health));

        layered(routes, config)
    }

    /// The fully layered router, without connection info.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Tracker counting this server's live connections.
    pub fn connections(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    /// Accept connections until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, "HTTP server starting");
        }

        let (draining_tx, draining_rx) = watch::channel(false);
        let header_read_timeout = Duration::from_secs(self.config.timeouts.header_read_secs);

        loop {
            let (stream, peer, permit) = tokio::select! {
                _ = shutdown.recv() => break,
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(ListenerError::Closed) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                },
            };

            let guard = self.tracker.track();
            let span = tracing::debug_span!("connection", id = %guard.id(), peer = %peer);
            let service = Extension(ConnectInfo(peer)).layer(self.router.clone());

            tokio::spawn(
                serve_connection(
                    stream,
                    service,
                    header_read_timeout,
                    draining_rx.clone(),
                    permit,
                    guard,
                )
                .instrument(span),
            );
        }

        drop(listener);
        tracing::info!(
            active_connections = self.tracker.active_count(),
            "Stopped accepting, draining connections"
        );
        let _ = draining_tx.send(true);

        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        if tokio::time::timeout(grace, self.tracker.wait_idle()).await.is_err() {
            tracing::warn!(
                remaining = self.tracker.active_count(),
                "Drain deadline reached, abandoning connections"
            );
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wrap routes in the request ID, tracing, panic, timeout and header layers.
#[allow(deprecated)]
fn layered(routes: Router, config: &ServiceConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(no_store_layer())
        .layer(nosniff_layer())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

    routes.layer(middleware)
}

/// Serve one connection to completion. Errors stay local to this connection.
async fn serve_connection<S>(
    stream: TcpStream,
    service: S,
    header_read_timeout: Duration,
    mut draining: watch::Receiver<bool>,
    _permit: ConnectionPermit,
    _guard: ConnectionGuard,
) where
    S: tower::Service<
            axum::http::Request<hyper::body::Incoming>,
            Response = axum::response::Response,
            Error = std::convert::Infallible,
        > + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .header_read_timeout(header_read_timeout);

    let conn = builder.serve_connection(TokioIo::new(stream), TowerToHyperService::new(service));
    tokio::pin!(conn);

    let result = tokio::select! {
        result = conn.as_mut() => result,
        _ = draining.changed() => {
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    };

    // Resets, disconnects and header timeouts end up here; none affect other connections.
    if let Err(e) = result {
        tracing::debug!(error = %e, "Connection ended with error");
    }
}
