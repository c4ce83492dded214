//! ER wait-time RSS feed HTTP microservice.
//!
//! Proxies the hospital wait-time API and republishes each facility's wait
//! times as an RSS 2.0 feed.
//!
//! # Endpoints
//!
//! - `GET /er_waittime/{facility_code}` - RSS feed for one facility
//! - `GET /billboard?faccodes=<code>` - Same feed, query parameter form
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//! - `GET /metrics` - Prometheus exposition (when enabled)
//!
//! # Configuration
//!
//! - `ERURL` - Upstream wait-time API base URL (required)
//! - `ERTOKEN` - Upstream bearer token (required)
//! - `SERVICE_HOST` - Bind address (default: 0.0.0.0)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `LOG_FORMAT` / `RUST_LOG` - Log output format and level
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::routing::get;
use tracing::{error, info, warn};

use erwait_service_shared::{
    init_logging, init_metrics, metrics_handler, router, AppState, LoggingConfig, MetricsConfig,
};

const DEFAULT_PORT: u16 = 8080;

/// Listener configuration read from `SERVICE_HOST` and `SERVICE_PORT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ServiceConfig {
    host: IpAddr,
    port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("SERVICE_HOST")
                .and_then(|h| h.trim().parse().ok())
                .unwrap_or(defaults.host),
            port: lookup("SERVICE_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env().with_service(env!("CARGO_PKG_NAME")))?;

    let service = ServiceConfig::from_env();
    let metrics = MetricsConfig::from_env();

    let state = AppState::from_env().map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(upstream = ?state, "application state loaded");

    let mut app = router(state);

    match init_metrics(&metrics) {
        Ok(()) => {
            app = app.route(&metrics.path, get(metrics_handler));
            info!(path = %metrics.path, "metrics endpoint enabled");
        }
        Err(e) => warn!(error = %e, "metrics endpoint disabled"),
    }

    let addr = service.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_service_config_from_lookup() {
        let config = ServiceConfig::from_lookup(|key| match key {
            "SERVICE_HOST" => Some("127.0.0.1".to_string()),
            "SERVICE_PORT" => Some(" 9090 ".to_string()),
            _ => None,
        });
        assert_eq!(config.addr().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_service_config_ignores_invalid_values() {
        let config = ServiceConfig::from_lookup(|key| match key {
            "SERVICE_HOST" => Some("not-an-ip".to_string()),
            "SERVICE_PORT" => Some("99999".to_string()),
            _ => None,
        });
        assert_eq!(config, ServiceConfig::default());
    }
}
