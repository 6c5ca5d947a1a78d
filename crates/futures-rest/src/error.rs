//! Futures REST API error types.

use auth::AuthError;
use execution_core::OrderError;
use rest_client::RestError;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the futures REST API.
#[derive(Debug, Error)]
pub enum FuturesRestError {
    /// Malformed symbol, side, quantity or price. Raised before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] OrderError),

    /// Network failure, timeout, non-2xx status or undecodable body.
    #[error("transport failure: {0}")]
    Transport(#[from] RestError),

    /// Credentials rejected at construction.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Error payload the exchange returns with non-2xx responses:
/// `{"code": -1000, "msg": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub code: i32,
    pub msg: String,
}

impl FuturesRestError {
    /// Exchange error payload, if this is an HTTP error carrying one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        match self {
            Self::Transport(rest) => rest
                .body()
                .and_then(|body| serde_json::from_str(body).ok()),
            _ => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
