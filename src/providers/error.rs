use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        hint: Option<String>,
    },

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("Message blocked: {reason}")]
    Blocked { reason: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),
}

impl ProviderError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit { .. } | Self::Connection(_) | Self::Timeout(_) | Self::Server { .. }
        )
    }

    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        match self {
            Self::Blocked { reason } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_status(status: u16, body: &str, api_key_env_var: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(String::from))
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            401 | 403 => Self::Authentication {
                message,
                hint: Some(format!("Check your {api_key_env_var} environment variable")),
            },
            404 => Self::ModelNotFound(message),
            429 => Self::RateLimit {
                message,
                retry_after: None,
            },
            400..=499 => Self::InvalidRequest(message),
            500..=599 => Self::Server { status, message },
            _ => Self::InvalidRequest(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(ProviderError::server(503, "overloaded").is_retryable());
        assert!(ProviderError::Connection("network error".into()).is_retryable());
        assert!(ProviderError::Timeout(Duration::from_secs(30)).is_retryable());

        assert!(!ProviderError::blocked("SAFETY").is_retryable());
        assert!(!ProviderError::InvalidRequest("bad request".into()).is_retryable());
        assert!(!ProviderError::Configuration("missing key".into()).is_retryable());
    }

    #[test]
    fn test_block_reason() {
        let err = ProviderError::blocked("SAFETY");
        assert!(err.is_blocked());
        assert_eq!(err.block_reason(), Some("SAFETY"));
        assert_eq!(err.to_string(), "Message blocked: SAFETY");

        let err = ProviderError::Connection("reset".into());
        assert!(!err.is_blocked());
        assert!(err.block_reason().is_none());
    }

    #[test]
    fn test_from_status_400_uses_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err = ProviderError::from_status(400, body, "GEMINI_API_KEY");

        match err {
            ProviderError::InvalidRequest(message) => assert_eq!(message, "API key not valid"),
            other => panic!("Expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_from_status_403_hints_env_var() {
        let err = ProviderError::from_status(403, "", "GEMINI_API_KEY");

        match err {
            ProviderError::Authentication { message, hint } => {
                assert_eq!(message, "HTTP 403");
                assert!(hint.unwrap().contains("GEMINI_API_KEY"));
            }
            other => panic!("Expected Authentication error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_status_404_and_429() {
        assert!(matches!(
            ProviderError::from_status(404, "{}", "K"),
            ProviderError::ModelNotFound(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "{}", "K"),
            ProviderError::RateLimit { .. }
        ));
    }

    #[test]
    fn test_from_status_500() {
        let body = r#"{"error": {"message": "Internal error"}}"#;
        match ProviderError::from_status(500, body, "K") {
            ProviderError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal error");
            }
            other => panic!("Expected Server error, got {other:?}"),
        }
    }
}
