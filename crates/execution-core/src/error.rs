use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed order input, rejected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("symbol must be non-empty and alphanumeric, e.g. BTCUSDT (got {0:?})")]
    InvalidSymbol(String),

    #[error("side must be BUY or SELL (got {0:?})")]
    InvalidSide(String),

    #[error("time in force must be GTC, IOC, FOK or GTX (got {0:?})")]
    InvalidTimeInForce(String),

    #[error("quantity must be positive (got {0})")]
    NonPositiveQuantity(Decimal),

    #[error("price must be positive (got {0})")]
    NonPositivePrice(Decimal),
}
