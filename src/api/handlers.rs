use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::error::ApiError;
use crate::api::models::{
    DepthEntry, HealthResponse, MarketSummaryResponse, OrderBookResponse, SubmitOrderRequest,
    SubmitOrderResponse, TradeView,
};
use crate::api::state::AppState;
use crate::types::{price, Order, Side, Trade};

/// GET /api/orderbook — aggregated depth, bids descending, asks ascending
pub async fn get_orderbook(State(state): State<AppState>) -> Json<OrderBookResponse> {
    Json(orderbook_response(&state))
}

/// GET /api/trades — trade history in execution order
pub async fn get_trades(State(state): State<AppState>) -> Json<Vec<TradeView>> {
    let trades = state.market.snapshot_trades();
    Json(trades.iter().map(TradeView::from).collect())
}

/// POST /api/orders — validate, rest the order, match, broadcast
pub async fn submit_order(
    State(state): State<AppState>,
    payload: Result<Json<SubmitOrderRequest>, JsonRejection>,
) -> Result<Json<SubmitOrderResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidOrder(rejection.body_text()))?;

    let side = Side::parse(&request.order_type).ok_or_else(|| {
        ApiError::InvalidOrder(format!("invalid order type: {}", request.order_type))
    })?;

    if request.quantity <= 0.0 || request.price <= 0.0 {
        return Err(ApiError::InvalidOrder(format!(
            "invalid quantity or price: quantity={}, price={}",
            request.quantity, request.price
        )));
    }

    let price = price::from_f64(request.price)
        .ok_or_else(|| ApiError::InvalidOrder(format!("invalid price: {}", request.price)))?;
    let quantity = request.quantity.round() as u64;

    // IDs come from the nanosecond clock, so they double as arrival stamps.
    let now = now_nanos();
    let order = Order::new(now, side, quantity, price, request.client_id, now);

    let trades = state.market.submit_order(order)?;

    debug!(
        order_id = now,
        side = side.as_str(),
        quantity,
        price = request.price,
        "order accepted"
    );
    if !trades.is_empty() {
        info!(count = trades.len(), "orders matched");
    }

    publish_updates(&state, &trades);

    Ok(Json(SubmitOrderResponse {
        status: "success",
        order_id: now,
    }))
}

/// GET /api/market-summary — derived counters
pub async fn get_market_summary(State(state): State<AppState>) -> Json<MarketSummaryResponse> {
    Json(MarketSummaryResponse::from(state.market.market_summary()))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Nanoseconds since the UNIX epoch.
pub fn now_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn orderbook_response(state: &AppState) -> OrderBookResponse {
    OrderBookResponse {
        buy_orders: state
            .market
            .snapshot_bids()
            .into_iter()
            .map(DepthEntry::from)
            .collect(),
        sell_orders: state
            .market
            .snapshot_asks()
            .into_iter()
            .map(DepthEntry::from)
            .collect(),
    }
}

/// Push trade and depth updates to WebSocket subscribers. The book lock
/// is already released by now; a send error just means nobody is
/// listening.
fn publish_updates(state: &AppState, trades: &[Trade]) {
    for trade in trades {
        let _ = state.events.send(event_json("trade", &TradeView::from(trade)));
    }
    let _ = state
        .events
        .send(event_json("orderbook", &orderbook_response(state)));
}

fn event_json(kind: &str, data: &impl Serialize) -> String {
    serde_json::json!({ "type": kind, "data": data }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_nanos_is_monotonic_enough() {
        let a = now_nanos();
        let b = now_nanos();
        assert!(b >= a);
        assert!(a > 0);
    }

    #[test]
    fn test_event_json_shape() {
        let text = event_json("trade", &serde_json::json!({"trade_id": 0}));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["type"], "trade");
        assert_eq!(value["data"]["trade_id"], 0);
    }
}
