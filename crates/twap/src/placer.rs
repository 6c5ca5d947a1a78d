//! The one client capability the executor needs.

use async_trait::async_trait;
use execution_core::OrderSide;
use futures_rest::{FuturesRestClient, FuturesRestError};
use rust_decimal::Decimal;
use serde_json::Value;

/// Places a single market order and returns the exchange's response.
#[async_trait]
pub trait MarketOrderPlacer: Send + Sync {
    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        reduce_only: bool,
    ) -> Result<Value, FuturesRestError>;
}

#[async_trait]
impl MarketOrderPlacer for FuturesRestClient {
    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        reduce_only: bool,
    ) -> Result<Value, FuturesRestError> {
        FuturesRestClient::place_market_order(self, symbol, side, quantity, reduce_only).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TwapExecutor;
    use auth::ApiCredentials;
    use httpmock::{Mock, MockServer};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;

    const ORDER_PATH: &str = "/fapi/v1/order";

    async fn accept_orders(server: &MockServer) -> Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path(ORDER_PATH)
                    .header("X-MBX-APIKEY", "test-key")
                    .body_contains("symbol=BTCUSDT&side=BUY&type=MARKET&quantity=2&reduceOnly=false&")
                    .body_contains("&signature=");
                then.status(200)
                    .json_body(json!({"orderId": 42, "status": "FILLED", "executedQty": "2"}));
            })
            .await
    }

    async fn wait_for_hits(mock: &Mock<'_>, hits: usize) {
        while mock.hits_async().await < hits {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    #[tokio::test]
    async fn test_twap_through_client_records_rejected_slice() {
        let server = MockServer::start_async().await;
        let client = FuturesRestClient::new(
            ApiCredentials::new("test-key".into(), "test-secret".into()),
            &server.base_url(),
        )
        .unwrap();
        let executor = TwapExecutor::new(&client, "BTCUSDT", "BUY", dec!(10), 5, 1).unwrap();

        // Slices 1-2 accepted, slice 3 rejected, slices 4-5 accepted.
        let exchange = async {
            let first = accept_orders(&server).await;
            wait_for_hits(&first, 2).await;
            first.delete_async().await;

            let rejected = server
                .mock_async(|when, then| {
                    when.method(httpmock::Method::POST).path(ORDER_PATH);
                    then.status(400)
                        .json_body(json!({"code": -2019, "msg": "Margin is insufficient."}));
                })
                .await;
            wait_for_hits(&rejected, 1).await;
            rejected.delete_async().await;

            let rest = accept_orders(&server).await;
            wait_for_hits(&rest, 2).await;
            rest.hits_async().await
        };

        let (outcomes, later_hits) = tokio::join!(executor.execute(), exchange);

        assert_eq!(outcomes.len(), 5);
        assert_eq!(later_hits, 2);
        for (i, outcome) in outcomes.iter().enumerate() {
            if i == 2 {
                let error = outcome.error().unwrap();
                assert!(error.contains("transport failure"), "error was {}", error);
                assert!(error.contains("-2019"), "error was {}", error);
            } else {
                assert_eq!(outcome.response().unwrap()["orderId"], json!(42));
            }
        }
    }
}
