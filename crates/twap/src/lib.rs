//! Time-sliced order execution (TWAP).
//!
//! Splits one order into `slices` equal market orders placed `interval`
//! apart. Every planned slice is attempted exactly once, in order; a failed
//! slice is recorded and the remaining slices still run.
//!
//! # Example
//!
//! ```rust,ignore
//! use twap::TwapExecutor;
//! use rust_decimal_macros::dec;
//!
//! let executor = TwapExecutor::new(&client, "BTCUSDT", "BUY", dec!(0.01), 5, 10)?;
//! for outcome in executor.execute().await {
//!     println!("{}", outcome);
//! }
//! ```

mod executor;
mod placer;

pub use executor::{SliceOutcome, TwapExecutor, TwapPlan};
pub use placer::MarketOrderPlacer;
