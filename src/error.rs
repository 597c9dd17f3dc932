use thiserror::Error;

/// Failure of a geocoding, forecast or IP lookup request.
///
/// Everything here is shown to the user as a single "connection failed"
/// condition; [`FetchError::kind`] keeps the transport/parse split for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("unexpected response payload: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Parse,
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Timeout | FetchError::Connection(_) | FetchError::Status(_) => {
                FailureKind::Network
            }
            FetchError::Parse(_) => FailureKind::Parse,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Connection failed"
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_classify_as_network() {
        assert_eq!(FetchError::Timeout.kind(), FailureKind::Network);
        assert_eq!(FetchError::Status(503).kind(), FailureKind::Network);
        assert_eq!(
            FetchError::Connection("refused".to_string()).kind(),
            FailureKind::Network
        );
    }

    #[test]
    fn malformed_json_classifies_as_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let fetch: FetchError = err.into();
        assert_eq!(fetch.kind(), FailureKind::Parse);
    }

    #[test]
    fn every_failure_collapses_to_one_user_message() {
        for err in [
            FetchError::Timeout,
            FetchError::Status(404),
            FetchError::Parse("x".to_string()),
        ] {
            assert_eq!(err.user_message(), "Connection failed");
        }
    }
}
