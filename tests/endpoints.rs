//! End-to-end tests against a real listener.

use std::time::Duration;

use chrono::NaiveDateTime;
use ip_display::health::HealthStatus;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

fn ip_value(body: &str, value: &str) -> bool {
    body.contains(&format!(r#"<div class="ip-value">{}</div>"#, value))
}

/// Pull "YYYY-MM-DD HH:MM:SS" out of "Requested at: ... UTC".
fn requested_at(body: &str) -> &str {
    let start = body.find("Requested at: ").expect("timestamp label") + "Requested at: ".len();
    let rest = &body[start..];
    let end = rest.find(" UTC").expect("UTC suffix");
    &rest[..end]
}

#[tokio::test]
async fn index_shows_forwarded_header() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/"))
        .header("X-Forwarded-For", "1.2.3.4")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = res.text().await.unwrap();
    assert!(body.contains("<title>IP Address Display</title>"));
    assert!(ip_value(&body, "1.2.3.4"));

    server.stop().await;
}

#[tokio::test]
async fn index_without_header_shows_sentinel() {
    let server = common::start_server().await;

    let body = common::client()
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(ip_value(&body, "Not available"));

    server.stop().await;
}

#[tokio::test]
async fn index_shows_loopback_peer_and_timestamp() {
    let server = common::start_server().await;

    let body = common::client()
        .get(server.url("/"))
        .header("X-Forwarded-For", "203.0.113.50")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(ip_value(&body, "127.0.0.1"));

    let timestamp = requested_at(&body);
    assert_eq!(timestamp.len(), "2024-01-01 00:00:00".len());
    assert!(NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    assert!(body.contains(&format!("Requested at: {} UTC", timestamp)));

    server.stop().await;
}

#[tokio::test]
async fn forwarded_markup_is_escaped() {
    let server = common::start_server().await;

    let body = common::client()
        .get(server.url("/"))
        .header("X-Forwarded-For", "<script>alert(\"x\")</script>")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));

    server.stop().await;
}

#[tokio::test]
async fn health_ignores_request_headers() {
    let server = common::start_server().await;
    let client = common::client();

    for forwarded in [None, Some("1.2.3.4"), Some("<b>")] {
        let mut req = client.get(server.url("/health")).header("Accept", "text/html");
        if let Some(value) = forwarded {
            req = req.header("X-Forwarded-For", value);
        }

        let res = req.send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert!(res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json"));

        let status: HealthStatus = res.json().await.unwrap();
        assert_eq!(status.status, "healthy");
        assert_eq!(status.service, "ip-display-app");
    }

    server.stop().await;
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let server = common::start_server().await;

    let res = common::client().get(server.url("/missing")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    server.stop().await;
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/health"))
        .header("x-request-id", "probe-7")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "probe-7");

    server.stop().await;
}

#[tokio::test]
async fn stalled_client_is_disconnected() {
    let mut config = ip_display::ServiceConfig::default();
    config.timeouts.header_read_secs = 1;
    let server = common::start_server_with(config).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n").await.unwrap();

    // Headers never finish; the server must close the socket on its own.
    let mut buf = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf)).await;
    assert!(read.is_ok(), "connection was not closed by the server");

    server.stop().await;
}

#[tokio::test]
async fn shutdown_drains_and_stops_listening() {
    let server = common::start_server().await;
    let addr = server.addr;
    let connections = server.connections.clone();

    // Held open across shutdown; the drain must close it.
    let mut idle = TcpStream::connect(addr).await.unwrap();
    let res = common::client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    tokio::time::timeout(Duration::from_secs(15), server.stop())
        .await
        .expect("server did not stop");

    assert_eq!(connections.active_count(), 0);
    assert!(TcpStream::connect(addr).await.is_err());

    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), idle.read_to_end(&mut buf))
        .await
        .expect("idle connection left open");
}
