//! Upstream API configuration.
//!
//! The configuration is read once at startup and handed to the
//! [`UpstreamClient`](crate::UpstreamClient); nothing in the request path
//! touches the process environment.

use std::fmt;

use reqwest::Url;

use crate::error::{Error, Result};

/// Environment variable holding the upstream wait-time API base URL.
pub const UPSTREAM_URL_ENV: &str = "ERURL";

/// Environment variable holding the upstream bearer credential.
pub const UPSTREAM_TOKEN_ENV: &str = "ERTOKEN";

/// Query parameter the upstream API expects the facility code in.
pub const FACILITY_QUERY_PARAM: &str = "faccodes";

/// Base URL and credential for the upstream wait-time API.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    base_url: Url,
    token: String,
}

impl UpstreamConfig {
    /// Build a configuration from explicit values.
    ///
    /// The base URL must be an absolute `http` or `https` URL and the token
    /// must not be blank.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| Error::InvalidConfig {
            key: UPSTREAM_URL_ENV.to_string(),
            message: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig {
                key: UPSTREAM_URL_ENV.to_string(),
                message: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidConfig {
                key: UPSTREAM_TOKEN_ENV.to_string(),
                message: "token cannot be empty".to_string(),
            });
        }

        Ok(Self { base_url, token })
    }

    /// Read `ERURL` and `ERTOKEN` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup. Tests use this
    /// to avoid mutating the global environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(UPSTREAM_URL_ENV).ok_or_else(|| Error::MissingConfig {
            key: UPSTREAM_URL_ENV.to_string(),
        })?;
        let token = lookup(UPSTREAM_TOKEN_ENV).ok_or_else(|| Error::MissingConfig {
            key: UPSTREAM_TOKEN_ENV.to_string(),
        })?;

        Self::new(&base_url, token)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Upstream URL for a single facility: the base URL with
    /// `faccodes=<facility_code>` appended to its query string.
    pub fn request_url(&self, facility_code: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(FACILITY_QUERY_PARAM, facility_code);
        url
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_both_values() {
        let config = UpstreamConfig::from_lookup(lookup_from(&[
            ("ERURL", "https://api.example.com/waittimes"),
            ("ERTOKEN", "secret"),
        ]))
        .expect("config loads");

        assert_eq!(config.base_url().as_str(), "https://api.example.com/waittimes");
        assert_eq!(config.token(), "secret");
    }

    #[test]
    fn missing_url_is_reported() {
        let err = UpstreamConfig::from_lookup(lookup_from(&[("ERTOKEN", "secret")]))
            .expect_err("url is required");
        assert!(matches!(err, Error::MissingConfig { ref key } if key == "ERURL"));
    }

    #[test]
    fn missing_token_is_reported() {
        let err = UpstreamConfig::from_lookup(lookup_from(&[(
            "ERURL",
            "https://api.example.com/waittimes",
        )]))
        .expect_err("token is required");
        assert!(matches!(err, Error::MissingConfig { ref key } if key == "ERTOKEN"));
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = UpstreamConfig::new("/waittimes", "secret").expect_err("relative url");
        assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "ERURL"));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = UpstreamConfig::new("ftp://example.com/", "secret").expect_err("ftp url");
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn blank_token_is_rejected() {
        let err = UpstreamConfig::new("https://example.com/", "   ").expect_err("blank token");
        assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "ERTOKEN"));
    }

    #[test]
    fn request_url_appends_facility_code() {
        let config = UpstreamConfig::new("https://api.example.com/waittimes", "t").unwrap();
        assert_eq!(
            config.request_url("ABC123").as_str(),
            "https://api.example.com/waittimes?faccodes=ABC123"
        );
    }

    #[test]
    fn request_url_keeps_existing_query_and_encodes() {
        let config =
            UpstreamConfig::new("https://api.example.com/waittimes?region=north", "t").unwrap();
        assert_eq!(
            config.request_url("A B&C").as_str(),
            "https://api.example.com/waittimes?region=north&faccodes=A+B%26C"
        );
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = UpstreamConfig::new("https://api.example.com/", "super-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret"));
    }
}
