//! Client side of the health endpoint, used by `ip-display-probe`.
//!
//! An instance passes only when `/health` answers exactly 200 and the body
//! reports `status == "healthy"`.

use reqwest::StatusCode;
use thiserror::Error;

use crate::health::HealthStatus;

/// Why an instance failed its health check.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("invalid health payload: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("instance reported {:?}", .0.status)]
    Unhealthy(HealthStatus),
}

/// Judge a `/health` response from its status and body.
pub fn evaluate(status: StatusCode, body: &str) -> Result<HealthStatus, CheckError> {
    if status != StatusCode::OK {
        return Err(CheckError::UnexpectedStatus(status));
    }

    let health: HealthStatus = serde_json::from_str(body)?;
    if !health.is_healthy() {
        return Err(CheckError::Unhealthy(health));
    }

    Ok(health)
}

/// GET `{base_url}/health` and evaluate the answer.
pub async fn check(client: &reqwest::Client, base_url: &str) -> Result<HealthStatus, CheckError> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let res = client.get(url).send().await?;
    let status = res.status();
    let body = res.text().await?;

    evaluate(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEALTHY: &str = r#"{"status":"healthy","service":"ip-display-app"}"#;

    #[test]
    fn healthy_payload_passes() {
        let health = evaluate(StatusCode::OK, HEALTHY).unwrap();
        assert_eq!(health, HealthStatus::healthy());
    }

    #[test]
    fn other_success_codes_fail() {
        let err = evaluate(StatusCode::NO_CONTENT, HEALTHY).unwrap_err();
        assert!(matches!(err, CheckError::UnexpectedStatus(StatusCode::NO_CONTENT)));

        let err = evaluate(StatusCode::SERVICE_UNAVAILABLE, HEALTHY).unwrap_err();
        assert!(matches!(err, CheckError::UnexpectedStatus(_)));
    }

    #[test]
    fn malformed_payload_fails() {
        let err = evaluate(StatusCode::OK, "<html>ok</html>").unwrap_err();
        assert!(matches!(err, CheckError::InvalidBody(_)));
    }

    #[test]
    fn degraded_status_fails() {
        let body = r#"{"status":"degraded","service":"ip-display-app"}"#;
        match evaluate(StatusCode::OK, body).unwrap_err() {
            CheckError::Unhealthy(health) => assert_eq!(health.status, "degraded"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
