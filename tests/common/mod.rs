//! Test utilities and fixtures for showroom integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub use showroom::db::{create_pool, init_db, queries, AppState};
pub use showroom::email::EmailService;
pub use showroom::handlers;

/// Product id every eligible test order carries.
pub const TARGET_PRODUCT_ID: &str = "TARGET";

/// Create an AppState backed by a file database in a temp directory.
///
/// The pool hands out several connections; an in-memory database would give
/// each of them an independent empty schema. The returned TempDir must stay
/// alive for the duration of the test.
pub fn create_test_app_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("showroom-test.db");
    let pool = create_pool(db_path.to_str().unwrap()).expect("Failed to create pool");
    {
        let conn = pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize schema");
    }

    let state = AppState {
        db: pool,
        // No API key: mail delivery runs in disabled mode
        email: EmailService::new(None, "shop@example.com".to_string()),
        target_product_id: TARGET_PRODUCT_ID.to_string(),
    };
    (state, dir)
}

/// Full application router under test.
pub fn app(state: AppState) -> Router {
    handlers::router().with_state(state)
}

/// Webhook payload for a paid order of the target product.
pub fn order_payload(order_id: &str, quantity: i64) -> Value {
    json!({
        "id": order_id,
        "order_number": 1042,
        "financial_status": "paid",
        "created_at": "2024-01-15T10:30:00Z",
        "email": "buyer@example.com",
        "customer": {
            "email": "buyer-customer@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace"
        },
        "billing_address": { "name": "Ada Lovelace" },
        "shipping_address": { "name": "A. Lovelace" },
        "line_items": [
            { "product_id": TARGET_PRODUCT_ID, "quantity": quantity }
        ]
    })
}

/// POST a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response should be valid JSON")
}
