//! Shared utilities for integration tests.

use std::net::SocketAddr;

use ip_display::config::ServiceConfig;
use ip_display::http::HttpServer;
use ip_display::lifecycle::Shutdown;
use ip_display::net::{ConnectionTracker, Listener};
use tokio::task::JoinHandle;

/// A running server on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub connections: ConnectionTracker,
    pub handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Start the server with default settings bound to 127.0.0.1:0.
pub async fn start_server() -> TestServer {
    start_server_with(ServiceConfig::default()).await
}

/// Start the server with the given settings, overriding the bind address.
#[allow(dead_code)]
pub async fn start_server_with(mut config: ServiceConfig) -> TestServer {
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;

    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let connections = server.connections();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    TestServer {
        addr,
        shutdown,
        connections,
        handle,
    }
}

/// A client that never goes through a system proxy and never pools.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
