use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;

/// Build the REST router.
///
/// The permissive CORS layer also answers `OPTIONS` preflights for every
/// route, which the browser frontend depends on.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/orderbook", get(handlers::get_orderbook))
        .route("/api/trades", get(handlers::get_trades))
        .route("/api/orders", post(handlers::submit_order))
        .route("/api/market-summary", get(handlers::get_market_summary))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
