//! REST client error types.

use thiserror::Error;

/// Errors that can occur during REST API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// Non-2xx HTTP status with the response body.
    #[error("HTTP error: {status} - {message}")]
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Response body as received.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to parse response body as JSON.
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body, when the server answered with a non-2xx status.
    pub fn body(&self) -> Option<&str> {
        match self {
            RestError::HttpError { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout)
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_decode() {
            RestError::Parse(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if let Some(status) = err.status() {
            RestError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            RestError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_accessors() {
        let err = RestError::HttpError {
            status: 400,
            message: r#"{"code":-1102,"msg":"bad"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some(r#"{"code":-1102,"msg":"bad"}"#));
        assert!(err.to_string().starts_with("HTTP error: 400"));
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(RestError::Timeout.status(), None);
        assert!(RestError::Timeout.is_timeout());
        assert_eq!(RestError::Connection("refused".into()).body(), None);
    }
}
