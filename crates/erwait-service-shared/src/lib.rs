//! Shared HTTP infrastructure for the ER wait-time feed.
//!
//! Both the standalone microservice and the Lambda function serve the same
//! axum [`router`]; this crate provides it together with its glue:
//!
//! - [`AppState`]: Upstream wait-time source built once at startup
//! - [`routes`]: `/er_waittime` handlers and the router
//! - [`health`]: Liveness/readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`XmlResponse`]: `text/xml` success responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//!
//! # Architecture
//!
//! Handlers stay thin; all feed logic lives in `erwait-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract facility code                                    │
//! │  - Fetch payload from the WaitTimeSource                    │
//! │  - parse_records / build_feed / to_xml                      │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a canned [`erwait_lib::WaitTimeSource`]
//! for handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod response;
pub mod routes;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_feed_rendered, record_upstream_failure, MetricsConfig,
    MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    error_response, ProblemDetails, PROBLEM_BAD_GATEWAY, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST,
};
pub use response::XmlResponse;
pub use routes::router;
pub use state::{AppState, AppStateError};
