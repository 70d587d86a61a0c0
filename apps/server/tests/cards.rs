mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::spawn_app;

fn visa() -> Value {
    json!({
        "cardNumber": "4242 4242 4242 4242",
        "cardName": "Travel",
        "expiryDate": "12/49",
        "cvv": "123"
    })
}

#[tokio::test]
async fn registered_card_keeps_only_last_four() {
    let app = spawn_app().await;
    let (id, token) = app.signup("Alice", "alice@example.com", 0.0).await;

    let (status, card) = app
        .request(Method::POST, "/api/v1/cards", Some(&token), Some(visa()))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{card}");
    assert_eq!(card["accountId"], id.as_str());
    assert_eq!(card["last4"], "4242");
    assert_eq!(card["expiryDate"], "12/49");
    assert_eq!(card["brand"], "visa");
    assert!(card.get("cvv").is_none());
    assert!(card.get("cardNumber").is_none());
    assert!(!card.to_string().contains("4242424242424242"));

    let (status, cards) = app
        .request(Method::GET, "/api/v1/cards", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["id"], card["id"]);
}

#[tokio::test]
async fn invalid_cards_are_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.signup("Alice", "alice@example.com", 0.0).await;

    let mut bad_luhn = visa();
    bad_luhn["cardNumber"] = json!("4242 4242 4242 4241");
    let mut expired = visa();
    expired["expiryDate"] = json!("01/20");
    let mut short_cvv = visa();
    short_cvv["cvv"] = json!("12");
    let mut blank_name = visa();
    blank_name["cardName"] = json!("  ");
    let mut missing_cvv = visa();
    missing_cvv.as_object_mut().unwrap().remove("cvv");

    for body in [bad_luhn, expired, short_cvv, blank_name, missing_cvv] {
        let (status, err) = app
            .request(Method::POST, "/api/v1/cards", Some(&token), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{err}");
    }

    let (_, cards) = app
        .request(Method::GET, "/api/v1/cards", Some(&token), None)
        .await;
    assert!(cards.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cards_are_scoped_to_their_owner() {
    let app = spawn_app().await;
    let (_, alice) = app.signup("Alice", "alice@example.com", 0.0).await;
    let (_, bob) = app.signup("Bob", "bob@example.com", 0.0).await;

    let (_, card) = app
        .request(Method::POST, "/api/v1/cards", Some(&alice), Some(visa()))
        .await;
    let path = format!("/api/v1/cards/{}", card["id"].as_str().unwrap());

    let (_, listed) = app
        .request(Method::GET, "/api/v1/cards", Some(&bob), None)
        .await;
    assert!(listed.as_array().unwrap().is_empty());

    let (status, _) = app.request(Method::DELETE, &path, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.request(Method::DELETE, &path, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.request(Method::DELETE, &path, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cards_require_authentication() {
    let app = spawn_app().await;

    let (status, _) = app
        .request(Method::POST, "/api/v1/cards", None, Some(visa()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
