//! Test utilities for handler testing.
//!
//! [`StaticSource`] stands in for the upstream API: it answers every fetch
//! with the same canned payload or failure and remembers which facility codes
//! were requested.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use erwait_lib::{Error as LibError, Result as LibResult, WaitTimeSource};
use serde_json::{json, Value};

use crate::state::AppState;

/// Endpoint reported by [`StaticSource`] in readiness probes.
pub const STATIC_ENDPOINT: &str = "static://test";

#[derive(Debug, Clone)]
enum Canned {
    Payload(Value),
    Status(u16),
    NotJson,
}

/// Canned [`WaitTimeSource`]. Clones share the request log.
#[derive(Debug, Clone)]
pub struct StaticSource {
    canned: Canned,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticSource {
    fn new(canned: Canned) -> Self {
        Self {
            canned,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every fetch with `payload`.
    pub fn payload(payload: Value) -> Self {
        Self::new(Canned::Payload(payload))
    }

    /// Fail every fetch as if the upstream answered with `status`.
    pub fn upstream_status(status: u16) -> Self {
        Self::new(Canned::Status(status))
    }

    /// Fail every fetch as if the upstream body was not JSON.
    pub fn not_json() -> Self {
        Self::new(Canned::NotJson)
    }

    /// Facility codes requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|codes| codes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WaitTimeSource for StaticSource {
    async fn fetch(&self, facility_code: &str) -> LibResult<Value> {
        if let Ok(mut codes) = self.requested.lock() {
            codes.push(facility_code.to_string());
        }

        match &self.canned {
            Canned::Payload(payload) => Ok(payload.clone()),
            Canned::Status(status) => Err(LibError::UpstreamStatus { status: *status }),
            Canned::NotJson => Err(LibError::UnexpectedShape {
                found: "not valid JSON".to_string(),
            }),
        }
    }

    fn endpoint(&self) -> String {
        STATIC_ENDPOINT.to_string()
    }
}

/// One-record payload used across handler tests.
pub fn sample_payload() -> Value {
    json!([{ "facilityCode": "ABC123", "waitTimeInSeconds": 185 }])
}

/// State whose source answers with `payload`.
pub fn test_state(payload: Value) -> AppState {
    AppState::from_source(StaticSource::payload(payload))
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
