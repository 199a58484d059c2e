//! Integration tests for the /login token-exchange endpoint.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::*;

/// Mint tokens for an order and return them.
async fn seed_order(state: &AppState, order_id: &str, quantity: i64) -> Vec<String> {
    let response = post_json(
        app(state.clone()),
        "/orders",
        &order_payload(order_id, quantity),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["createdTokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_valid_token_returns_order() {
    let (state, _dir) = create_test_app_state();
    let tokens = seed_order(&state, "6001", 1).await;

    let response = post_json(
        app(state),
        "/login",
        &json!({ "token": tokens[0] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["orderId"], "6001");
    assert_eq!(body["orderNumber"], 1042);
    assert_eq!(body["email"], "buyer@example.com");
    assert_eq!(body["customerFirstName"], "Ada");
    assert_eq!(body["customerLastName"], "Lovelace");
    assert_eq!(body["billingName"], "Ada Lovelace");
    assert_eq!(body["shippingName"], "A. Lovelace");
    assert_eq!(body["createdAt"], 1705314600);
}

#[tokio::test]
async fn test_any_token_of_a_multi_token_order_logs_in() {
    let (state, _dir) = create_test_app_state();
    let tokens = seed_order(&state, "6002", 3).await;

    for token in &tokens {
        let response = post_json(app(state.clone()), "/login", &json!({ "token": token })).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["orderId"], "6002");
    }
}

#[tokio::test]
async fn test_token_is_trimmed_before_lookup() {
    let (state, _dir) = create_test_app_state();
    let tokens = seed_order(&state, "6003", 1).await;

    let padded = format!("  {}  ", tokens[0]);
    let response = post_json(app(state), "/login", &json!({ "token": padded })).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let (state, _dir) = create_test_app_state();
    seed_order(&state, "6004", 1).await;

    let bogus = "0".repeat(96);
    let response = post_json(app(state), "/login", &json!({ "token": bogus })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_token_lookup_is_exact_match() {
    let (state, _dir) = create_test_app_state();
    let tokens = seed_order(&state, "6005", 1).await;

    // Prefix of a real token is not a credential
    let prefix = &tokens[0][..32];
    let response = post_json(app(state), "/login", &json!({ "token": prefix })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_token_is_bad_request() {
    let (state, _dir) = create_test_app_state();

    for body in [json!({}), json!({ "token": null }), json!({ "token": "" }), json!({ "token": "   " })] {
        let response = post_json(app(state.clone()), "/login", &body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {} should be rejected",
            body
        );

        let parsed = body_json(response).await;
        assert_eq!(parsed["error"], "missing_token");
    }
}
