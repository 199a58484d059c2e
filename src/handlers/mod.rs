mod login;
mod mails;
mod orders;

pub use login::*;
pub use mails::*;
pub use orders::*;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/orders", post(receive_order))
        .route("/login", post(login))
        .route("/showroom-mails/{email}/send", post(resend_tokens))
}
