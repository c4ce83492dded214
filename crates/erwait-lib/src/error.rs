use thiserror::Error;

/// Convenient result alias for the ER wait-time library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value was not present in the environment.
    #[error("missing required configuration value {key}")]
    MissingConfig { key: String },

    /// A configuration value was present but could not be used.
    #[error("invalid configuration value {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// The upstream API answered with a non-success status code.
    #[error("upstream responded with status {status}")]
    UpstreamStatus { status: u16 },

    /// The upstream body was not a JSON array of records.
    #[error("upstream payload was {found}, expected an array of wait-time records")]
    UnexpectedShape { found: String },

    /// A single record in the upstream array failed validation.
    #[error("invalid wait-time record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    /// Raised when the feed document cannot be rendered as XML.
    #[error("failed to serialize feed: {message}")]
    FeedSerialize { message: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for failures reaching the upstream API: network errors and
    /// non-success status codes.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::UpstreamStatus { .. })
    }

    /// True when the upstream answered but its body could not be used.
    pub fn is_payload(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedShape { .. } | Error::InvalidRecord { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_transport() {
        let err = Error::UpstreamStatus { status: 500 };
        assert!(err.is_transport());
        assert!(!err.is_payload());
        assert_eq!(err.to_string(), "upstream responded with status 500");
    }

    #[test]
    fn shape_and_record_errors_are_payload() {
        let shape = Error::UnexpectedShape {
            found: "an object".to_string(),
        };
        let record = Error::InvalidRecord {
            index: 2,
            message: "missing field `facilityCode`".to_string(),
        };

        assert!(shape.is_payload());
        assert!(record.is_payload());
        assert!(!shape.is_transport());
        assert!(record.to_string().contains("index 2"));
    }

    #[test]
    fn config_errors_are_neither() {
        let err = Error::MissingConfig {
            key: "ERURL".to_string(),
        };
        assert!(!err.is_transport());
        assert!(!err.is_payload());
        assert!(err.to_string().contains("ERURL"));
    }
}
