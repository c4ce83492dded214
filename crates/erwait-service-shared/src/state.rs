//! Application state for the HTTP handlers.
//!
//! The upstream configuration is read once at startup and the resulting
//! client is shared by every request through axum's `State` extractor.

use std::sync::Arc;

use erwait_lib::{Error as LibError, UpstreamClient, UpstreamConfig, WaitTimeSource};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// `ERURL`/`ERTOKEN` were missing or unusable.
    Config(LibError),

    /// The HTTP client could not be constructed.
    Client(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid upstream configuration: {}", e),
            Self::Client(e) => write!(f, "failed to build upstream client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) | Self::Client(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use erwait_service_shared::{router, AppState};
///
/// let state = AppState::from_env()?;
/// let app = router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    source: Arc<dyn WaitTimeSource>,
}

impl AppState {
    /// Build state from `ERURL` and `ERTOKEN`.
    pub fn from_env() -> Result<Self, AppStateError> {
        let config = UpstreamConfig::from_env().map_err(AppStateError::Config)?;
        Self::from_config(config)
    }

    /// Build state around a real upstream client.
    pub fn from_config(config: UpstreamConfig) -> Result<Self, AppStateError> {
        tracing::info!(upstream = %config.base_url(), "configuring upstream client");
        let client = UpstreamClient::new(config).map_err(AppStateError::Client)?;
        Ok(Self::from_source(client))
    }

    /// Build state around any payload source. Tests use this to inject fakes.
    pub fn from_source(source: impl WaitTimeSource + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                source: Arc::new(source),
            }),
        }
    }

    /// Access the payload source.
    pub fn source(&self) -> &dyn WaitTimeSource {
        self.inner.source.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("upstream", &self.inner.source.endpoint())
            .finish()
    }
}
