//! Generic REST transport around reqwest.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - GET with query string, and form-encoded bodies for other methods
//! - JSON response deserialization
//! - Header injection for authentication
//! - An injected `RequestObserver` that sees every request, response and failure
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rest_client::{Method, RestClient, TracingObserver};
//!
//! let client = RestClient::new(
//!     "https://testnet.binancefuture.com",
//!     Duration::from_secs(15),
//!     Arc::new(TracingObserver),
//! )?;
//! let time: serde_json::Value = client
//!     .send(Method::GET, "/fapi/v1/time", "", &[])
//!     .await?;
//! ```

mod client;
mod error;
mod observer;

pub use client::RestClient;
pub use error::RestError;
pub use observer::{ObservedEvent, RecordingObserver, RequestObserver, TracingObserver};
pub use reqwest::Method;
