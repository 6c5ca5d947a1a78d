//! Order enums, intents and input validation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Convert from the exchange string representation.
    pub fn from_binance_str(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Convert to the exchange string representation.
    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_binance_str())
    }
}

impl FromStr for OrderSide {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_side(s)
    }
}

/// Order type. Only the two types this client places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    /// Convert to the exchange string representation.
    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_binance_str())
    }
}

/// Time in force for limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good Till Canceled - remains active until filled or canceled.
    #[default]
    GTC,
    /// Immediate Or Cancel - fill what's possible immediately, cancel rest.
    IOC,
    /// Fill Or Kill - must be filled completely immediately or canceled.
    FOK,
    /// Good Till Crossing - post-only, rejected if it would take liquidity.
    GTX,
}

impl TimeInForce {
    /// Convert from the exchange string representation.
    pub fn from_binance_str(s: &str) -> Option<Self> {
        match s {
            "GTC" => Some(Self::GTC),
            "IOC" => Some(Self::IOC),
            "FOK" => Some(Self::FOK),
            "GTX" => Some(Self::GTX),
            _ => None,
        }
    }

    /// Convert to the exchange string representation.
    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::GTC => "GTC",
            Self::IOC => "IOC",
            Self::FOK => "FOK",
            Self::GTX => "GTX",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_binance_str())
    }
}

impl FromStr for TimeInForce {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_binance_str(&s.to_uppercase())
            .ok_or_else(|| OrderError::InvalidTimeInForce(s.to_string()))
    }
}

/// Check that `symbol` is non-empty and alphanumeric; return it upper-cased.
pub fn validate_symbol(symbol: &str) -> Result<String, OrderError> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(OrderError::InvalidSymbol(symbol.to_string()));
    }
    Ok(symbol.to_uppercase())
}

/// Parse `side` case-insensitively as BUY or SELL.
pub fn validate_side(side: &str) -> Result<OrderSide, OrderError> {
    OrderSide::from_binance_str(&side.to_uppercase())
        .ok_or_else(|| OrderError::InvalidSide(side.to_string()))
}

fn ensure_positive_quantity(quantity: Decimal) -> Result<Decimal, OrderError> {
    if quantity <= Decimal::ZERO {
        return Err(OrderError::NonPositiveQuantity(quantity));
    }
    Ok(quantity)
}

/// A market order, validated but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub reduce_only: bool,
}

impl MarketOrder {
    /// Build a market order. The symbol is normalised to upper case.
    ///
    /// # Errors
    /// `OrderError::InvalidSymbol` or `OrderError::NonPositiveQuantity`.
    pub fn new(symbol: &str, side: OrderSide, quantity: Decimal) -> Result<Self, OrderError> {
        Ok(Self {
            symbol: validate_symbol(symbol)?,
            side,
            quantity: ensure_positive_quantity(quantity)?,
            reduce_only: false,
        })
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }
}

/// A limit order, validated but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub time_in_force: TimeInForce,
    pub reduce_only: bool,
}

impl LimitOrder {
    /// Build a GTC limit order. The symbol is normalised to upper case.
    ///
    /// # Errors
    /// `OrderError::InvalidSymbol`, `OrderError::NonPositiveQuantity` or
    /// `OrderError::NonPositivePrice`.
    pub fn new(
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<Self, OrderError> {
        if price <= Decimal::ZERO {
            return Err(OrderError::NonPositivePrice(price));
        }
        Ok(Self {
            symbol: validate_symbol(symbol)?,
            side,
            quantity: ensure_positive_quantity(quantity)?,
            price,
            time_in_force: TimeInForce::default(),
            reduce_only: false,
        })
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_side_conversion() {
        assert_eq!(OrderSide::from_binance_str("BUY"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::from_binance_str("SELL"), Some(OrderSide::Sell));
        assert_eq!(OrderSide::from_binance_str("INVALID"), None);

        assert_eq!(OrderSide::Buy.as_binance_str(), "BUY");
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_validate_symbol_uppercases() {
        assert_eq!(validate_symbol("btcusdt").unwrap(), "BTCUSDT");
        assert_eq!(validate_symbol("ETHUSDT").unwrap(), "ETHUSDT");
    }

    #[test]
    fn test_validate_symbol_rejects_malformed() {
        assert_eq!(
            validate_symbol("BTC-USDT"),
            Err(OrderError::InvalidSymbol("BTC-USDT".into()))
        );
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("BTC USDT").is_err());
    }

    #[test]
    fn test_validate_side() {
        assert_eq!(validate_side("buy").unwrap(), OrderSide::Buy);
        assert_eq!(validate_side("Sell").unwrap(), OrderSide::Sell);
        assert_eq!(
            validate_side("HOLD"),
            Err(OrderError::InvalidSide("HOLD".into()))
        );
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("sell".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert!("".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_time_in_force_parse() {
        assert_eq!("gtc".parse::<TimeInForce>().unwrap(), TimeInForce::GTC);
        assert_eq!("GTX".parse::<TimeInForce>().unwrap(), TimeInForce::GTX);
        assert!("DAY".parse::<TimeInForce>().is_err());
        assert_eq!(TimeInForce::default(), TimeInForce::GTC);
    }

    #[test]
    fn test_market_order_new() {
        let order = MarketOrder::new("btcusdt", OrderSide::Buy, dec!(0.01)).unwrap();
        assert_eq!(order.symbol, "BTCUSDT");
        assert!(!order.reduce_only);

        let order = order.reduce_only(true);
        assert!(order.reduce_only);
    }

    #[test]
    fn test_market_order_rejects_zero_quantity() {
        let err = MarketOrder::new("BTCUSDT", OrderSide::Sell, Decimal::ZERO).unwrap_err();
        assert_eq!(err, OrderError::NonPositiveQuantity(Decimal::ZERO));
    }

    #[test]
    fn test_limit_order_defaults_to_gtc() {
        let order = LimitOrder::new("BTCUSDT", OrderSide::Buy, dec!(1), dec!(30000.5)).unwrap();
        assert_eq!(order.time_in_force, TimeInForce::GTC);
        assert_eq!(order.price.to_string(), "30000.5");
    }

    #[test]
    fn test_limit_order_rejects_negative_price() {
        let err = LimitOrder::new("BTCUSDT", OrderSide::Buy, dec!(1), dec!(-1)).unwrap_err();
        assert_eq!(err, OrderError::NonPositivePrice(dec!(-1)));
    }

    #[test]
    fn test_limit_order_builder() {
        let order = LimitOrder::new("ethusdt", OrderSide::Sell, dec!(2), dec!(1800))
            .unwrap()
            .time_in_force(TimeInForce::IOC)
            .reduce_only(true);
        assert_eq!(order.symbol, "ETHUSDT");
        assert_eq!(order.time_in_force, TimeInForce::IOC);
        assert!(order.reduce_only);
    }
}
