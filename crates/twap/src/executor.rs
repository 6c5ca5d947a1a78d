//! TWAP plan and executor.

use std::fmt;
use std::time::Duration;

use execution_core::OrderSide;
use futures_rest::{FuturesRestClient, FuturesRestError};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn, Instrument};

use crate::placer::MarketOrderPlacer;

/// What to execute: validated symbol and side, clamped slice count and interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwapPlan {
    symbol: String,
    side: OrderSide,
    total_quantity: Decimal,
    slices: u32,
    interval: Duration,
}

impl TwapPlan {
    /// Build a plan from raw input.
    ///
    /// Symbol and side go through the client validators and fail fast.
    /// `slices` below 1 becomes 1 and `interval_secs` below 1 becomes 1;
    /// both are clamped silently apart from a warning.
    pub fn new(
        symbol: &str,
        side: &str,
        total_quantity: Decimal,
        slices: i64,
        interval_secs: i64,
    ) -> Result<Self, FuturesRestError> {
        let symbol = FuturesRestClient::validate_symbol(symbol)?;
        let side = FuturesRestClient::validate_side(side)?;

        let clamped_slices = slices.clamp(1, u32::MAX as i64) as u32;
        let clamped_interval = interval_secs.max(1) as u64;

        if clamped_slices as i64 != slices || clamped_interval as i64 != interval_secs {
            warn!(
                requested_slices = slices,
                requested_interval_secs = interval_secs,
                slices = clamped_slices,
                interval_secs = clamped_interval,
                "TWAP parameters clamped"
            );
        }

        Ok(Self {
            symbol,
            side,
            total_quantity,
            slices: clamped_slices,
            interval: Duration::from_secs(clamped_interval),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    pub fn slices(&self) -> u32 {
        self.slices
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `total_quantity / slices`.
    pub fn slice_quantity(&self) -> Decimal {
        self.total_quantity / Decimal::from(self.slices)
    }
}

/// Result of one slice: the exchange payload, or the captured error.
///
/// Serializes as the raw payload or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SliceOutcome {
    Placed(Value),
    Failed { error: String },
}

impl SliceOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Placed(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Placed(_) => None,
            Self::Failed { error } => Some(error),
        }
    }
}

impl fmt::Display for SliceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed(value) => write!(f, "{}", value),
            Self::Failed { error } => write!(f, "{{\"error\": {:?}}}", error),
        }
    }
}

/// Runs a [`TwapPlan`] against a [`MarketOrderPlacer`].
pub struct TwapExecutor<'a, P: MarketOrderPlacer + ?Sized> {
    placer: &'a P,
    plan: TwapPlan,
}

impl<'a, P: MarketOrderPlacer + ?Sized> TwapExecutor<'a, P> {
    /// Validate and clamp the input, see [`TwapPlan::new`].
    pub fn new(
        placer: &'a P,
        symbol: &str,
        side: &str,
        total_quantity: Decimal,
        slices: i64,
        interval_secs: i64,
    ) -> Result<Self, FuturesRestError> {
        let plan = TwapPlan::new(symbol, side, total_quantity, slices, interval_secs)?;
        Ok(Self::from_plan(placer, plan))
    }

    pub fn from_plan(placer: &'a P, plan: TwapPlan) -> Self {
        info!(
            symbol = %plan.symbol,
            side = %plan.side,
            total = %plan.total_quantity,
            slices = plan.slices,
            interval_secs = plan.interval.as_secs(),
            "TWAP initialized"
        );
        Self { placer, plan }
    }

    pub fn plan(&self) -> &TwapPlan {
        &self.plan
    }

    /// Place every slice in order and return one outcome per slice.
    ///
    /// A failed slice is recorded and does not stop the rest. The executor
    /// waits `interval` after each slice except the last. Never fails as a whole.
    pub async fn execute(&self) -> Vec<SliceOutcome> {
        let span = tracing::info_span!(
            "twap",
            symbol = %self.plan.symbol,
            side = %self.plan.side
        );
        self.run().instrument(span).await
    }

    async fn run(&self) -> Vec<SliceOutcome> {
        let plan = &self.plan;
        let quantity = plan.slice_quantity();
        let mut outcomes = Vec::new();

        for index in 0..plan.slices {
            let slice = index + 1;
            info!(slice, slices = plan.slices, quantity = %quantity, "TWAP slice placing market order");

            let outcome = match self
                .placer
                .place_market_order(&plan.symbol, plan.side, quantity, false)
                .await
            {
                Ok(response) => {
                    info!(slice, response = %response, "TWAP slice placed");
                    SliceOutcome::Placed(response)
                }
                Err(err) => {
                    error!(slice, error = %err, "TWAP slice failed");
                    SliceOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            outcomes.push(outcome);

            if slice < plan.slices {
                tokio::time::sleep(plan.interval).await;
            }
        }

        let failed = outcomes.iter().filter(|o| !o.is_placed()).count();
        info!(slices = plan.slices, failed, "TWAP finished");

        outcomes
    }
}
