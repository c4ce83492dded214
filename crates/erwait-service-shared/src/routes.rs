//! Feed routes shared by the microservice and the Lambda.
//!
//! # Endpoints
//!
//! - `GET /er_waittime` - Usage hint
//! - `GET /er_waittime/{facility_code}` - RSS feed for one facility
//! - `GET /billboard?faccodes=<code>` - Same feed, query parameter form
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use erwait_lib::{build_feed, parse_records, Error as LibError};

use crate::{
    error_response, health_live, health_ready, record_feed_rendered, record_upstream_failure,
    AppState, MetricsLayer, ProblemDetails, RequestId, XmlResponse,
};

/// Body of `GET /er_waittime`.
pub const USAGE_HINT: &str = "Hi there, please pass the facility code...";

/// Query string accepted by `/billboard`.
#[derive(Debug, Deserialize)]
pub struct BillboardParams {
    pub faccodes: Option<String>,
}

/// Build the feed router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/er_waittime", get(usage_handler))
        .route("/er_waittime/{facility_code}", get(facility_feed_handler))
        .route("/billboard", get(billboard_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

async fn usage_handler() -> &'static str {
    USAGE_HINT
}

/// Handle `GET /er_waittime/{facility_code}`.
async fn facility_feed_handler(
    State(state): State<AppState>,
    Path(facility_code): Path<String>,
    request_id: Option<Extension<RequestId>>,
) -> Response {
    let request_id = resolve_request_id(request_id);
    render_feed(&state, &facility_code, &request_id).await
}

/// Handle `GET /billboard?faccodes=<code>`.
async fn billboard_handler(
    State(state): State<AppState>,
    Query(params): Query<BillboardParams>,
    request_id: Option<Extension<RequestId>>,
) -> Response {
    let request_id = resolve_request_id(request_id);

    match params.faccodes.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => render_feed(&state, code, &request_id).await,
        _ => ProblemDetails::bad_request(
            "query parameter 'faccodes' is required",
            request_id.as_str(),
        )
        .into_response(),
    }
}

fn resolve_request_id(extension: Option<Extension<RequestId>>) -> RequestId {
    extension
        .map(|Extension(id)| id)
        .unwrap_or_else(RequestId::generate)
}

/// Fetch, validate and render the feed for one facility.
async fn render_feed(state: &AppState, facility_code: &str, request_id: &RequestId) -> Response {
    info!(facility_code, "fetching wait times");

    let payload = match state.source().fetch(facility_code).await {
        Ok(payload) => payload,
        Err(e) => return failure(&e, facility_code, request_id),
    };

    let records = match parse_records(payload) {
        Ok(records) => records,
        Err(e) => return failure(&e, facility_code, request_id),
    };

    let feed = build_feed(&records);
    debug!(facility_code, feed = ?feed, "feed built");

    let xml = match feed.to_xml() {
        Ok(xml) => xml,
        Err(e) => return failure(&e, facility_code, request_id),
    };

    record_feed_rendered(feed.item_count());
    info!(facility_code, items = feed.item_count(), "feed rendered");

    XmlResponse::new(xml).into_response()
}

fn failure(error: &LibError, facility_code: &str, request_id: &RequestId) -> Response {
    let reason = failure_reason(error);
    error!(facility_code, reason, error = %error, "feed request failed");
    record_upstream_failure(reason);
    error_response(error, request_id.as_str())
}

fn failure_reason(error: &LibError) -> &'static str {
    if error.is_transport() {
        "transport"
    } else if error.is_payload() {
        "payload"
    } else {
        "render"
    }
}
