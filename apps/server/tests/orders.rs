mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn orders_roll_up_into_holdings() {
    let app = spawn_app().await;
    let (_, token) = app.signup("Alice", "alice@example.com", 100.0).await;

    for body in [
        json!({ "orderType": "buy", "symbol": "aapl", "name": "Apple", "shares": 10, "price": 100 }),
        json!({ "orderType": "buy", "symbol": "AAPL", "name": "Apple", "shares": 10, "price": 200 }),
        json!({ "orderType": "sell", "symbol": "AAPL", "name": "Apple", "shares": 5, "price": 250 }),
        json!({ "orderType": "buy", "symbol": "MSFT", "name": "Microsoft", "shares": 2, "price": 300 }),
        json!({ "orderType": "sell", "symbol": "MSFT", "name": "Microsoft", "shares": 2, "price": 310 }),
    ] {
        let (status, order) = app
            .request(Method::POST, "/api/v1/orders", Some(&token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{order}");
        assert_eq!(order["status"], "completed");
    }

    let (status, holdings) = app
        .request(Method::GET, "/api/v1/portfolio/holdings", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let holdings = holdings.as_array().unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0]["symbol"], "AAPL");
    assert_eq!(holdings[0]["shares"], 15.0);
    assert_eq!(holdings[0]["averagePrice"], 150.0);

    let (_, orders) = app
        .request(Method::GET, "/api/v1/orders", Some(&token), None)
        .await;
    assert_eq!(orders.as_array().unwrap().len(), 5);

    // Orders are simulated and leave cash alone.
    assert_eq!(app.balance(&token).await, 100.0);
}

#[tokio::test]
async fn overselling_is_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.signup("Alice", "alice@example.com", 0.0).await;
    let (_, other) = app.signup("Bob", "bob@example.com", 0.0).await;

    let (status, order) = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(&token),
            Some(json!({ "orderType": "buy", "symbol": "TSLA", "name": "Tesla", "shares": 3, "price": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total"], 30.0);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(&token),
            Some(json!({ "orderType": "sell", "symbol": "TSLA", "name": "Tesla", "shares": 4, "price": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(&other),
            Some(json!({ "orderType": "sell", "symbol": "TSLA", "name": "Tesla", "shares": 1, "price": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_orders_are_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.signup("Alice", "alice@example.com", 0.0).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(&token),
            Some(json!({
                "orderType": "buy",
                "symbol": "AAPL",
                "name": "Apple",
                "shares": 1e16,
                "price": 1e16
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, orders) = app
        .request(Method::GET, "/api/v1/orders", Some(&token), None)
        .await;
    assert!(orders.as_array().unwrap().is_empty());
}
