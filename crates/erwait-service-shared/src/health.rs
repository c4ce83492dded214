//! Health check handlers.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for container and load-balancer probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// RFC 3339 time the probe was answered.
    pub timestamp: String,

    /// Upstream wait-time API the service proxies (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            timestamp: now_rfc3339(),
            upstream: None,
        }
    }

    /// Create a ready status naming the configured upstream.
    pub fn ready(service: &str, version: &str, upstream: impl Into<String>) -> Self {
        Self {
            upstream: Some(upstream.into()),
            ..Self::alive(service, version)
        }
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"erwait-service-shared","version":"0.1.0","timestamp":"2025-01-01T00:00:00Z"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The upstream configuration is validated before the router is built, so a
/// running instance is always ready; the response names the upstream host.
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.source().endpoint(),
    );
    (StatusCode::OK, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert_eq!(status.version, "1.0.0");
        assert!(status.upstream.is_none());
        assert!(status.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("test-service", "1.0.0", "https://api.example.com");
        assert_eq!(status.status, "ok");
        assert_eq!(status.upstream.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("erwait", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"erwait\""));
        assert!(!json.contains("upstream")); // skip_serializing_if
    }
}
