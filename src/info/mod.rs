//! Connection info page served at `/`.
//!
//! # Data Flow
//! ```text
//! request headers + peer address + local clock
//!     → ConnectionInfo (per request, owned)
//!     → page.rs (fixed template, escape.rs for every value)
//!     → 200 text/html
//! ```

pub mod escape;
pub mod page;

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{Extensions, HeaderMap},
    response::Html,
};
use chrono::{DateTime, Local};

use crate::http::response::HandlerError;

/// Shown when a value cannot be determined for the request.
pub const NOT_AVAILABLE: &str = "Not available";

/// Header set by proxies and load balancers to carry the client address.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Local time rendered with a literal "UTC" suffix. The clock is not
/// converted; see DESIGN.md.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// The three values reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub forwarded_ip: String,
    pub direct_ip: String,
    pub timestamp: String,
}

impl ConnectionInfo {
    /// Collect the values for one request.
    pub fn capture(headers: &HeaderMap, peer: Option<SocketAddr>, now: DateTime<Local>) -> Self {
        Self {
            forwarded_ip: forwarded_for(headers),
            direct_ip: peer_ip(peer),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Raw `X-Forwarded-For` value. Repeated header lines are joined with ", ".
pub fn forwarded_for(headers: &HeaderMap) -> String {
    let joined = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

/// IP of the immediate TCP peer, with IPv4-mapped addresses unwrapped.
pub fn peer_ip(peer: Option<SocketAddr>) -> String {
    match peer {
        Some(addr) => addr.ip().to_canonical().to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `GET /`: render the connection info page.
pub async fn handle_index(
    headers: HeaderMap,
    extensions: Extensions,
) -> Result<Html<String>, HandlerError> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let info = ConnectionInfo::capture(&headers, peer, Local::now());

    tracing::debug!(
        forwarded_ip = %info.forwarded_ip,
        direct_ip = %info.direct_ip,
        "Rendering info page"
    );

    Ok(Html(page::render(&info)?))
}
