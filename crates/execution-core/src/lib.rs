//! Core order types for the futures REST API.
//!
//! - **Enums**: `OrderSide`, `OrderType`, `TimeInForce` with their wire names
//! - **Intents**: `MarketOrder` and `LimitOrder`, validated on construction
//! - **Validators**: `validate_symbol` and `validate_side` for raw user input
//!
//! Validation here only rejects obviously malformed input; the exchange
//! remains the source of truth for whether an order is accepted.

mod error;
mod order;

pub use error::OrderError;
pub use order::{
    validate_side, validate_symbol, LimitOrder, MarketOrder, OrderSide, OrderType, TimeInForce,
};
