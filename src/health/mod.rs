//! Liveness endpoint for load-balancer health checks.
//!
//! The handler does no I/O and cannot fail; the instance is "healthy" for as
//! long as it can answer HTTP.

pub mod check;

use axum::Json;
use serde::{Deserialize, Serialize};

/// Name reported in the health payload.
pub const SERVICE_NAME: &str = "ip-display-app";

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `GET /health`
pub async fn handle_health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}
