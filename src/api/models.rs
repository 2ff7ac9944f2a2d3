use serde::{Deserialize, Serialize};

use crate::orderbook::{DepthLevel, MarketSummary};
use crate::types::{price, Trade};

/// Body of `POST /api/orders`.
///
/// `quantity` and `price` arrive as JSON numbers; the quantity is rounded
/// to the nearest integer unit and the price quantized to ticks before
/// anything reaches the book.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOrderRequest {
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: f64,
    pub price: f64,
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOrderResponse {
    pub status: &'static str,
    pub order_id: u64,
}

/// One aggregated price level in the depth response
#[derive(Debug, Clone, Serialize)]
pub struct DepthEntry {
    pub price: f64,
    pub quantity: u64,
}

impl From<DepthLevel> for DepthEntry {
    fn from(level: DepthLevel) -> Self {
        Self {
            price: price::to_f64(level.price),
            quantity: level.quantity,
        }
    }
}

/// Body of `GET /api/orderbook`: bids descending, asks ascending
#[derive(Debug, Clone, Serialize)]
pub struct OrderBookResponse {
    pub buy_orders: Vec<DepthEntry>,
    pub sell_orders: Vec<DepthEntry>,
}

/// A trade as rendered to clients (price back in real-valued form)
#[derive(Debug, Clone, Serialize)]
pub struct TradeView {
    pub trade_id: u64,
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    pub quantity: u64,
    pub price: f64,
    pub timestamp: u64,
}

impl From<&Trade> for TradeView {
    fn from(trade: &Trade) -> Self {
        Self {
            trade_id: trade.trade_id,
            buy_order_id: trade.buy_order_id,
            sell_order_id: trade.sell_order_id,
            quantity: trade.quantity,
            price: price::to_f64(trade.price),
            timestamp: trade.timestamp,
        }
    }
}

/// Body of `GET /api/market-summary`.
///
/// The averages are derived here from the book's exact integer counters
/// rather than accumulated in floating point.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummaryResponse {
    pub total_trades: u64,
    pub total_volume: u64,
    pub avg_trade_size: f64,
    pub avg_price: f64,
    pub buy_depth: u64,
    pub sell_depth: u64,
}

impl From<MarketSummary> for MarketSummaryResponse {
    fn from(summary: MarketSummary) -> Self {
        let avg_trade_size = if summary.total_trades > 0 {
            summary.total_volume as f64 / summary.total_trades as f64
        } else {
            0.0
        };
        let avg_price = if summary.total_volume > 0 {
            (summary.total_notional as f64 / price::SCALE as f64) / summary.total_volume as f64
        } else {
            0.0
        };

        Self {
            total_trades: summary.total_trades,
            total_volume: summary.total_volume,
            avg_trade_size,
            avg_price,
            buy_depth: summary.bid_depth,
            sell_depth: summary.ask_depth,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
