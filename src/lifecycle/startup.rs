//! Startup orchestration.
//!
//! Order: load config, install logging, bind, then serve until a signal.
//! Any startup error is fatal and returned to `main`. A config error installs
//! default logging first so `main` can still log it.

use std::path::Path;

use crate::config::{load_config, ObservabilityConfig};
use crate::error::ServiceError;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_signal;
use crate::net::Listener;
use crate::observability::init_logging;

/// Run the service with the given config file and port override.
pub async fn run(config_path: Option<&Path>, port_override: Option<u16>) -> Result<(), ServiceError> {
    let config = match load_config(config_path, port_override) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&ObservabilityConfig::default());
            return Err(e.into());
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("logging already initialised: {e}");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        header_read_timeout_secs = config.timeouts.header_read_secs,
        "Configuration loaded"
    );

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            let signal = wait_for_signal().await;
            tracing::info!(signal, "Shutdown signal received");
            shutdown.trigger();
        }
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
