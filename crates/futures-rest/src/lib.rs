//! Signed REST client for USDT-M futures.
//!
//! This crate provides the authenticated client used by the bot:
//!
//! - **Signing**: every call carries `timestamp`, `recvWindow` and an
//!   HMAC-SHA256 `signature` over the ordered, form-encoded parameters
//! - **Order management**: market and limit order placement, order lookup
//! - **Account**: futures balance
//! - **Error handling**: invalid input is rejected before any network call;
//!   transport and HTTP failures surface as `FuturesRestError::Transport`
//!
//! Responses are returned as `serde_json::Value`, exactly as the exchange sent them.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use common::FuturesEnvironment;
//! use futures_rest::FuturesRestClient;
//! use rust_decimal_macros::dec;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = FuturesRestClient::with_environment(credentials, FuturesEnvironment::Testnet)?;
//!
//! let side = FuturesRestClient::validate_side("buy")?;
//! let response = client
//!     .place_market_order("BTCUSDT", side, dec!(0.001), false)
//!     .await?;
//! ```

mod client;
mod error;

pub use client::{FuturesRestClient, BALANCE_PATH, ORDER_PATH, REQUEST_TIMEOUT};
pub use error::{ApiErrorBody, FuturesRestError};
