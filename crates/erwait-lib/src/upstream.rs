use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};

/// Source of raw wait-time payloads for a facility.
///
/// The HTTP handlers only see this trait so tests can swap the real upstream
/// client for canned payloads.
#[async_trait]
pub trait WaitTimeSource: Send + Sync {
    /// Fetch the raw JSON payload for `facility_code`.
    ///
    /// Transport failures and non-success statuses are returned as errors for
    /// which [`Error::is_transport`] holds. A body that is not JSON at all is
    /// reported as [`Error::UnexpectedShape`].
    async fn fetch(&self, facility_code: &str) -> Result<Value>;

    /// Where payloads come from, for readiness reporting.
    fn endpoint(&self) -> String;
}

/// Authenticated client for the upstream wait-time API.
///
/// Issues exactly one GET per call; no retries and no timeout beyond the
/// HTTP client's defaults.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    config: UpstreamConfig,
    http: Client,
}

impl UpstreamClient {
    /// Create a client with a fresh connection pool.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(config, http))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(config: UpstreamConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

#[async_trait]
impl WaitTimeSource for UpstreamClient {
    async fn fetch(&self, facility_code: &str) -> Result<Value> {
        let url = self.config.request_url(facility_code);
        debug!(facility_code, url = %url, "requesting wait times from upstream");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.config.token())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(facility_code, status = status.as_u16(), "upstream returned error status");
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(facility_code, bytes = body.len(), "upstream payload received");

        serde_json::from_slice(&body).map_err(|e| Error::UnexpectedShape {
            found: format!("not valid JSON ({})", e),
        })
    }

    fn endpoint(&self) -> String {
        let url = self.config.base_url();
        match url.host_str() {
            Some(host) => format!("{}://{}", url.scheme(), host),
            None => url.scheme().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_hides_path_and_query() {
        let config =
            UpstreamConfig::new("https://api.example.com/v1/waittimes?key=1", "token").unwrap();
        let client = UpstreamClient::new(config).expect("client builds");
        assert_eq!(client.endpoint(), "https://api.example.com");
    }

    #[test]
    fn debug_output_does_not_leak_token() {
        let config = UpstreamConfig::new("https://api.example.com/", "hunter2").unwrap();
        let client = UpstreamClient::new(config).expect("client builds");
        assert!(!format!("{:?}", client).contains("hunter2"));
    }
}
