//! USDT-M futures REST client with request signing.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FuturesRestError;
use auth::{
    ApiCredentials, AuthError, RequestParams, RequestSigner, SignedRequest, DEFAULT_RECV_WINDOW,
};
use common::{BotConfig, FuturesEnvironment};
use execution_core::{LimitOrder, MarketOrder, OrderSide, OrderType, TimeInForce};
use rest_client::{Method, RequestObserver, RestClient, TracingObserver};
use rust_decimal::Decimal;
use serde_json::Value;

/// Request timeout for every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Order creation (POST) and lookup (GET).
pub const ORDER_PATH: &str = "/fapi/v1/order";

/// Futures account balance (GET).
pub const BALANCE_PATH: &str = "/fapi/v2/balance";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Futures REST API client with authentication support.
///
/// One instance owns one connection pool; calls against the same instance
/// are expected to be issued one at a time.
pub struct FuturesRestClient {
    client: RestClient,
    credentials: ApiCredentials,
    recv_window: u64,
}

impl FuturesRestClient {
    /// Create a client for `base_url` with the default receive window and
    /// a `tracing`-backed observer.
    ///
    /// # Errors
    /// Returns an error if the credentials are blank or the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials, base_url: &str) -> Result<Self, FuturesRestError> {
        Self::with_observer(
            credentials,
            base_url,
            DEFAULT_RECV_WINDOW,
            Arc::new(TracingObserver),
        )
    }

    /// Create a client for a production or testnet environment.
    pub fn with_environment(
        credentials: ApiCredentials,
        environment: FuturesEnvironment,
    ) -> Result<Self, FuturesRestError> {
        Self::new(credentials, environment.rest_base_url())
    }

    /// Create a client from loaded bot configuration.
    pub fn from_config(config: &BotConfig) -> Result<Self, FuturesRestError> {
        Self::with_observer(
            config.credentials.clone(),
            &config.base_url,
            config.recv_window,
            Arc::new(TracingObserver),
        )
    }

    /// Create a client with every knob explicit.
    ///
    /// # Arguments
    /// * `credentials` - API key and secret
    /// * `base_url` - e.g. "https://testnet.binancefuture.com"
    /// * `recv_window` - server-side staleness tolerance in milliseconds
    /// * `observer` - receives every request, response and failure
    pub fn with_observer(
        credentials: ApiCredentials,
        base_url: &str,
        recv_window: u64,
        observer: Arc<dyn RequestObserver>,
    ) -> Result<Self, FuturesRestError> {
        if credentials.api_key().trim().is_empty() {
            return Err(AuthError::EmptyCredential("api key").into());
        }
        if credentials.expose_secret().is_empty() {
            return Err(AuthError::EmptyCredential("api secret").into());
        }

        let client = RestClient::new(base_url, REQUEST_TIMEOUT, observer)?;

        Ok(Self {
            client,
            credentials,
            recv_window,
        })
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    // ========================================================================
    // Signing and transport
    // ========================================================================

    /// Sign a copy of `params` with the current time.
    ///
    /// The result holds the original pairs, then `timestamp`, then
    /// `recvWindow`, plus the signature over exactly that sequence.
    pub fn sign(&self, params: &RequestParams) -> SignedRequest {
        RequestSigner::new(&self.credentials, self.recv_window).sign_params(params)
    }

    /// Sign `params` and send them to `path`.
    ///
    /// GET sends the signed parameters as the query string; other methods
    /// send them as a form-encoded body. The API key travels in a header.
    /// Returns the response body as parsed JSON, untouched.
    ///
    /// # Errors
    /// `FuturesRestError::Transport` on network failure, timeout, non-2xx
    /// status or a body that is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &RequestParams,
    ) -> Result<Value, FuturesRestError> {
        let signed = self.sign(params);
        let headers = [(API_KEY_HEADER, self.credentials.api_key())];

        let value = self
            .client
            .send(method, path, &signed.query_string(), &headers)
            .await?;

        Ok(value)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Require a non-empty alphanumeric symbol; returns it upper-cased.
    pub fn validate_symbol(symbol: &str) -> Result<String, FuturesRestError> {
        Ok(execution_core::validate_symbol(symbol)?)
    }

    /// Require BUY or SELL, case-insensitively.
    pub fn validate_side(side: &str) -> Result<OrderSide, FuturesRestError> {
        Ok(execution_core::validate_side(side)?)
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Place a market order.
    ///
    /// POST /fapi/v1/order
    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        reduce_only: bool,
    ) -> Result<Value, FuturesRestError> {
        let order = MarketOrder::new(symbol, side, quantity)?.reduce_only(reduce_only);
        self.submit_market_order(&order).await
    }

    /// Send an already-built market order.
    pub async fn submit_market_order(&self, order: &MarketOrder) -> Result<Value, FuturesRestError> {
        let params = RequestParams::new()
            .with("symbol", &order.symbol)
            .with("side", order.side)
            .with("type", OrderType::Market)
            .with("quantity", order.quantity)
            .with("reduceOnly", order.reduce_only);

        tracing::info!(
            symbol = %order.symbol,
            side = %order.side,
            quantity = %order.quantity,
            reduce_only = order.reduce_only,
            "Placing market order"
        );

        self.request(Method::POST, ORDER_PATH, &params).await
    }

    /// Place a limit order.
    ///
    /// POST /fapi/v1/order
    ///
    /// The price is sent as its decimal string, never via a float.
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
        reduce_only: bool,
    ) -> Result<Value, FuturesRestError> {
        let order = LimitOrder::new(symbol, side, quantity, price)?
            .time_in_force(time_in_force)
            .reduce_only(reduce_only);
        self.submit_limit_order(&order).await
    }

    /// Send an already-built limit order.
    pub async fn submit_limit_order(&self, order: &LimitOrder) -> Result<Value, FuturesRestError> {
        let params = RequestParams::new()
            .with("symbol", &order.symbol)
            .with("side", order.side)
            .with("type", OrderType::Limit)
            .with("price", order.price)
            .with("quantity", order.quantity)
            .with("timeInForce", order.time_in_force)
            .with("reduceOnly", order.reduce_only);

        tracing::info!(
            symbol = %order.symbol,
            side = %order.side,
            quantity = %order.quantity,
            price = %order.price,
            time_in_force = %order.time_in_force,
            "Placing limit order"
        );

        self.request(Method::POST, ORDER_PATH, &params).await
    }

    /// Query an order by exchange order ID.
    ///
    /// GET /fapi/v1/order
    pub async fn get_order(&self, symbol: &str, order_id: u64) -> Result<Value, FuturesRestError> {
        let params = RequestParams::new()
            .with("symbol", Self::validate_symbol(symbol)?)
            .with("orderId", order_id);

        self.request(Method::GET, ORDER_PATH, &params).await
    }

    /// Futures account balances.
    ///
    /// GET /fapi/v2/balance
    pub async fn get_account_balance(&self) -> Result<Value, FuturesRestError> {
        self.request(Method::GET, BALANCE_PATH, &RequestParams::new())
            .await
    }
}

impl std::fmt::Debug for FuturesRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuturesRestClient")
            .field("base_url", &self.client.base_url())
            .field("api_key", &self.credentials.api_key())
            .field("recv_window", &self.recv_window)
            .finish()
    }
}
