//! Generic REST client wrapper around reqwest.

use std::sync::Arc;
use std::time::Duration;

use crate::error::RestError;
use crate::observer::RequestObserver;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// REST client bound to one base URL.
///
/// Holds a single `reqwest::Client` so connections are pooled for the
/// lifetime of the instance.
pub struct RestClient {
    client: Client,
    base_url: String,
    observer: Arc<dyn RequestObserver>,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://fapi.binance.com")
    /// * `timeout` - Request timeout duration
    /// * `observer` - Receives every request, response and failure
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        observer: Arc<dyn RequestObserver>,
    ) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        observer.on_init(&base_url);

        Ok(Self {
            client,
            base_url,
            observer,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request with `query` as the query string.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, RestError> {
        self.send(Method::GET, path, query, headers).await
    }

    /// Make a POST request with `body` as a form-encoded body.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, RestError> {
        self.send(Method::POST, path, body, headers).await
    }

    /// Send a request and deserialize the JSON response.
    ///
    /// GET puts `params` in the query string; every other method sends them
    /// as an `application/x-www-form-urlencoded` body. Any transport failure,
    /// non-2xx status or undecodable body is reported to the observer and
    /// returned as an error.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, RestError> {
        let url = self.build_url(path, None);
        self.observer.on_request(&method, &url, params);

        let result = self.dispatch(&method, path, &url, params, headers).await;

        if let Err(err) = &result {
            self.observer.on_error(&method, &url, params, err);
        }
        result
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        url: &str,
        params: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, RestError> {
        let mut request = if *method == Method::GET {
            self.client.get(self.build_url(path, Some(params)))
        } else {
            self.client
                .request(method.clone(), url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(params.to_string())
        };

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await?;
        self.handle_response(method, url, response).await
    }

    /// Build a full URL from path and optional query string.
    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Handle HTTP response and deserialize JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &str,
        response: Response,
    ) -> Result<T, RestError> {
        let status = response.status();
        let body = response.text().await?;
        self.observer
            .on_response(method, url, status.as_u16(), &body);

        if !status.is_success() {
            return Err(RestError::HttpError {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
