//! Review service errors

use serde_json::Value;
use thiserror::Error;

/// Message shown when the service gives no usable explanation
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// A failed call to the review service.
///
/// Non-2xx responses keep their JSON body (when there is one) so the UI can
/// show the server's own `error` message.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, timeout, ...)
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("service responded with status {status}")]
    Status { status: u16, body: Option<Value> },

    /// A success response whose body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The configured endpoint is not a valid URL
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ApiError {
    /// The `error` string from the response body, if the service sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                body: Some(body), ..
            } => body
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }

    /// Message suitable for inline display in a form
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string()
    }

    /// HTTP status, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service rejected the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<ApiError> for report_core::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Endpoint(url) => report_core::Error::invalid_endpoint(url),
            other => report_core::Error::http(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(body: Option<Value>) -> ApiError {
        ApiError::Status { status: 400, body }
    }

    #[test]
    fn test_server_message_is_used_when_present() {
        let err = status_error(Some(json!({"error": "Course already reported"})));
        assert_eq!(err.user_message(), "Course already reported");
    }

    #[test]
    fn test_missing_error_field_falls_back() {
        let err = status_error(Some(json!({"message": "nope"})));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_string_error_field_falls_back() {
        let err = status_error(Some(json!({"error": {"status": 400}})));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_empty_error_field_falls_back() {
        let err = status_error(Some(json!({"error": ""})));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_no_body_falls_back() {
        assert_eq!(status_error(None).user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_transport_error_falls_back() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::Status {
            status: 401,
            body: None
        }
        .is_unauthorized());
        assert!(!status_error(None).is_unauthorized());
    }

    #[test]
    fn test_conversion_into_core_error() {
        let err: report_core::Error = ApiError::Endpoint("::".into()).into();
        assert!(matches!(err, report_core::Error::InvalidEndpoint { .. }));

        let err: report_core::Error = status_error(None).into();
        assert!(matches!(err, report_core::Error::Http { .. }));
    }
}
