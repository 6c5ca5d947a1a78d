//! Authentication and signing for the futures REST API.
//!
//! This crate provides secure credential management and request signing
//! for authenticated calls to the exchange.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **Ordered Parameters**: `RequestParams` keeps insertion order, which is the
//!   order the exchange verifies the signature against.
//! - **HMAC-SHA256 Signing**: appends `timestamp`, `recvWindow` and `signature`
//!   to a copy of the caller's parameters.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestParams, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials, 5000);
//!
//! let params = RequestParams::new()
//!     .with("symbol", "BTCUSDT")
//!     .with("side", "BUY");
//! let signed = signer.sign_params(&params);
//! println!("{}", signed.query_string());
//! ```

mod credentials;
mod error;
mod params;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use params::{RequestParams, SignedRequest};
pub use signer::{current_timestamp_ms, RequestSigner, DEFAULT_RECV_WINDOW};
