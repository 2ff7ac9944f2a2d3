use tokio::sync::broadcast;

use crate::market::Market;

/// Shared state for the REST handlers: the market handle and the event
/// channel feeding the WebSocket broadcast server.
#[derive(Clone)]
pub struct AppState {
    pub market: Market,
    pub events: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(market: Market, events: broadcast::Sender<String>) -> Self {
        Self { market, events }
    }
}
