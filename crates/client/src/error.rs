//! Error types for the Monarch Money client.

use serde::Deserialize;

/// Result type for client operations.
pub type MonarchResult<T> = Result<T, MonarchError>;

/// Error types that can occur when talking to the Monarch Money API.
#[derive(Debug, thiserror::Error)]
pub enum MonarchError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// GraphQL query was accepted but the response carried errors.
    #[error("GraphQL error in {operation}: {message}")]
    GraphQl { operation: String, message: String },

    /// Login was rejected by the API.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The account requires multi-factor authentication and no one-time
    /// code could be supplied.
    #[error("Multi-factor authentication required but no MFA secret is configured")]
    MfaRequired,

    /// Invalid client configuration or credentials.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MonarchError {
    /// Whether the error means the session could never be established.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::MfaRequired)
    }

    /// Create an API error from a status code and response body.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => Self::Api {
                status,
                message: parsed
                    .detail
                    .or(parsed.error_code)
                    .unwrap_or_else(|| body.to_string()),
            },
            Err(_) => Self::Api {
                status,
                message: body.to_string(),
            },
        }
    }
}

/// Error body shape used by the Monarch Money auth endpoints.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_prefers_detail() {
        let err = MonarchError::from_response(403, r#"{"detail":"Forbidden","error_code":"X"}"#);
        match err {
            MonarchError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_response_falls_back_to_error_code() {
        let err = MonarchError::from_response(403, r#"{"error_code":"MFA_REQUIRED"}"#);
        match err {
            MonarchError::Api { message, .. } => assert_eq!(message, "MFA_REQUIRED"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_response_keeps_unparseable_body() {
        let err = MonarchError::from_response(502, "Bad Gateway");
        match err {
            MonarchError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn authentication_classification() {
        assert!(MonarchError::MfaRequired.is_authentication());
        assert!(MonarchError::Authentication("bad password".into()).is_authentication());
        assert!(!MonarchError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_authentication());
    }
}
