//! Trading engine entry point.
//!
//! Starts the REST API and the WebSocket broadcast feed, seeds the
//! demonstration book, and runs until interrupted.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use matchbook::api::{self, AppState};
use matchbook::config::ServerConfig;
use matchbook::market::Market;
use matchbook::types::{price, Order, Side};
use matchbook::ws;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env().context("loading configuration")?;

    let market = Market::with_capacity(config.book_capacity);
    if config.seed_demo {
        seed_demo_book(&market);
    }

    // Event channel feeding every connected WebSocket client. Capacity
    // bounds how far a slow client may fall behind before it skips.
    let (events, _) = broadcast::channel(256);

    let ws_addr = config.ws_addr;
    let ws_events = events.clone();
    tokio::spawn(async move {
        if let Err(err) = ws::serve(ws_addr, ws_events).await {
            error!(%err, "websocket server failed");
        }
    });

    let state = AppState::new(market, events);
    let app = api::create_router(state);

    let listener = TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("binding {}", config.http_addr))?;
    info!("REST API listening on http://{}", config.http_addr);
    info!("websocket feed on ws://{}/ws", config.ws_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving REST API")?;

    Ok(())
}

/// Seed the book the API ships with: two bids below two asks, so the
/// opening matching sweep produces no trades and all four orders rest.
fn seed_demo_book(market: &Market) {
    let now = api::handlers::now_nanos();
    let seeds = [
        (1, Side::Buy, 100, "99.50", "client1"),
        (2, Side::Buy, 200, "99.00", "client2"),
        (3, Side::Sell, 150, "100.50", "client3"),
        (4, Side::Sell, 300, "101.00", "client4"),
    ];

    for (order_id, side, quantity, price_str, client_id) in seeds {
        let price = price::to_fixed(price_str).expect("demo price literal");
        let order = Order::new(order_id, side, quantity, price, client_id, now);
        if let Err(err) = market.add_order(order) {
            warn!(%err, order_id, "skipping demo order");
        }
    }
    market.match_orders();

    info!("seeded demo book with 4 resting orders");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
