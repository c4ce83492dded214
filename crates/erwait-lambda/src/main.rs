//! AWS Lambda function serving ER wait-time RSS feeds.
//!
//! API Gateway and Function URL events are translated by `lambda_http` into
//! ordinary HTTP requests and dispatched to the same axum router the
//! standalone service uses. The upstream client is built once per cold start.

use axum::Router;
use lambda_http::Error;
use tracing::{error, info};

use erwait_service_shared::{init_logging, router, AppState, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging(&LoggingConfig::from_env().with_service(env!("CARGO_PKG_NAME")))?;

    let app = build_app(AppState::from_env().map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?);

    lambda_http::run(app).await
}

fn build_app(state: AppState) -> Router {
    info!(upstream = ?state, "cold start complete");
    router(state)
}
