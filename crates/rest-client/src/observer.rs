//! Request/response observation.
//!
//! Each `RestClient` is handed its own observer at construction.

use parking_lot::Mutex;
use reqwest::Method;

use crate::error::RestError;

/// Receives every request, response and failure of a `RestClient`.
pub trait RequestObserver: Send + Sync {
    /// Client constructed.
    fn on_init(&self, base_url: &str);

    /// About to send. `params` is the encoded query string or form body.
    fn on_request(&self, method: &Method, url: &str, params: &str);

    /// Response received, before the status is checked.
    fn on_response(&self, method: &Method, url: &str, status: u16, body: &str);

    /// The call failed; the error is returned to the caller right after.
    fn on_error(&self, method: &Method, url: &str, params: &str, error: &RestError);
}

/// Default observer: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_init(&self, base_url: &str) {
        tracing::info!(base_url = %base_url, "REST client initialized");
    }

    fn on_request(&self, method: &Method, url: &str, params: &str) {
        tracing::info!(method = %method, url = %url, params = %params, "REQUEST");
    }

    fn on_response(&self, method: &Method, url: &str, status: u16, body: &str) {
        tracing::info!(method = %method, url = %url, status, body = %body, "RESPONSE");
    }

    fn on_error(&self, method: &Method, url: &str, params: &str, error: &RestError) {
        tracing::error!(
            method = %method,
            url = %url,
            params = %params,
            status = ?error.status(),
            error = %error,
            "HTTP error"
        );
    }
}

/// One event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Init {
        base_url: String,
    },
    Request {
        method: String,
        url: String,
        params: String,
    },
    Response {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
    Error {
        method: String,
        url: String,
        params: String,
        message: String,
    },
}

/// Observer that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far, oldest first.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }

    fn record(&self, event: ObservedEvent) {
        self.events.lock().push(event);
    }
}

impl RequestObserver for RecordingObserver {
    fn on_init(&self, base_url: &str) {
        self.record(ObservedEvent::Init {
            base_url: base_url.to_string(),
        });
    }

    fn on_request(&self, method: &Method, url: &str, params: &str) {
        self.record(ObservedEvent::Request {
            method: method.to_string(),
            url: url.to_string(),
            params: params.to_string(),
        });
    }

    fn on_response(&self, method: &Method, url: &str, status: u16, body: &str) {
        self.record(ObservedEvent::Response {
            method: method.to_string(),
            url: url.to_string(),
            status,
            body: body.to_string(),
        });
    }

    fn on_error(&self, method: &Method, url: &str, params: &str, error: &RestError) {
        self.record(ObservedEvent::Error {
            method: method.to_string(),
            url: url.to_string(),
            params: params.to_string(),
            message: error.to_string(),
        });
    }
}
