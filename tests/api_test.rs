//! REST adapter tests: drive the router directly with `oneshot` requests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tower::util::ServiceExt;

use matchbook::api::{create_router, AppState};
use matchbook::market::Market;
use matchbook::types::{price, Order, Side};

fn test_app() -> (axum::Router, Market) {
    let market = Market::new();
    let (events, _keep_alive) = broadcast::channel(16);
    let state = AppState::new(market.clone(), events);
    (create_router(state), market)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_order(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let (app, _market) = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn submit_order_rests_on_the_book() {
    let (app, _market) = test_app();

    let response = app
        .clone()
        .oneshot(post_order(json!({
            "type": "BUY",
            "quantity": 100,
            "price": 99.5,
            "client_id": "client1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert!(body["order_id"].as_u64().unwrap() > 0);

    let response = app.oneshot(get("/api/orderbook")).await.unwrap();
    let book = body_json(response).await;
    assert_eq!(book["buy_orders"][0]["price"], 99.5);
    assert_eq!(book["buy_orders"][0]["quantity"], 100);
    assert_eq!(book["sell_orders"], json!([]));
}

#[tokio::test]
async fn crossing_orders_produce_a_trade() {
    let (app, _market) = test_app();

    app.clone()
        .oneshot(post_order(json!({
            "type": "SELL",
            "quantity": 10,
            "price": 100.0,
            "client_id": "seller"
        })))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_order(json!({
            "type": "BUY",
            "quantity": 10,
            "price": 100.0,
            "client_id": "buyer"
        })))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/api/trades")).await.unwrap();
    let trades = body_json(response).await;
    let trades = trades.as_array().unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0]["trade_id"], 0);
    assert_eq!(trades[0]["quantity"], 10);
    assert_eq!(trades[0]["price"], 100.0);

    let response = app.oneshot(get("/api/market-summary")).await.unwrap();
    let summary = body_json(response).await;
    assert_eq!(summary["total_trades"], 1);
    assert_eq!(summary["total_volume"], 10);
    assert_eq!(summary["avg_trade_size"], 10.0);
    assert_eq!(summary["avg_price"], 100.0);
    assert_eq!(summary["buy_depth"], 0);
    assert_eq!(summary["sell_depth"], 0);
}

#[tokio::test]
async fn unknown_order_type_is_a_400() {
    let (app, _market) = test_app();

    let response = app
        .oneshot(post_order(json!({
            "type": "HOLD",
            "quantity": 10,
            "price": 100.0,
            "client_id": "c"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("HOLD"));
}

#[tokio::test]
async fn non_positive_quantity_or_price_is_a_400() {
    let (app, _market) = test_app();

    for body in [
        json!({"type": "BUY", "quantity": 0, "price": 100.0, "client_id": "c"}),
        json!({"type": "BUY", "quantity": -5, "price": 100.0, "client_id": "c"}),
        json!({"type": "SELL", "quantity": 10, "price": 0.0, "client_id": "c"}),
        json!({"type": "SELL", "quantity": 10, "price": -1.0, "client_id": "c"}),
    ] {
        let response = app.clone().oneshot(post_order(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}

#[tokio::test]
async fn malformed_body_is_a_400() {
    let (app, _market) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"type": "BUY""#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn fractional_quantity_rounds_to_nearest_unit() {
    let (app, _market) = test_app();

    let response = app
        .clone()
        .oneshot(post_order(json!({
            "type": "BUY",
            "quantity": 99.7,
            "price": 50.0,
            "client_id": "c"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/orderbook")).await.unwrap();
    let book = body_json(response).await;
    assert_eq!(book["buy_orders"][0]["quantity"], 100);
}

#[tokio::test]
async fn orderbook_reflects_seeded_market_state() {
    let (app, market) = test_app();

    // Seed through the façade, bypassing HTTP, as the server boot does.
    market
        .add_order(Order::new(
            1,
            Side::Buy,
            100,
            price::to_fixed("99.50").unwrap(),
            "client1",
            0,
        ))
        .unwrap();
    market
        .add_order(Order::new(
            2,
            Side::Sell,
            150,
            price::to_fixed("100.50").unwrap(),
            "client3",
            1,
        ))
        .unwrap();

    let response = app.oneshot(get("/api/orderbook")).await.unwrap();
    let book = body_json(response).await;

    assert_eq!(book["buy_orders"][0]["price"], 99.5);
    assert_eq!(book["sell_orders"][0]["price"], 100.5);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let (app, _market) = test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/orders")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
