use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::intake::{self, Eligibility};

/// POST /orders - webhook intake.
///
/// normalize -> classify -> reconcile -> mail. The upstream sender delivers
/// at-least-once, so any non-2xx response may be retried; a retried request
/// lands on the already_processed path instead of minting duplicate tokens.
pub async fn receive_order(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response> {
    let order = intake::normalize(&payload)?;

    let owed = match intake::classify(&order, &state.target_product_id) {
        Eligibility::Ignored(reason) => {
            tracing::info!(
                order_id = %order.order_id,
                reason = reason.as_str(),
                "Order ignored"
            );
            return Ok((
                StatusCode::ACCEPTED,
                Json(json!({ "status": "ignored", "reason": reason.as_str() })),
            )
                .into_response());
        }
        Eligibility::Eligible { owed } => owed,
    };

    let recipient = order
        .recipient
        .clone()
        .ok_or(AppError::Validation("no_recipient"))?;

    let outcome = {
        let mut conn = state.db.get()?;
        queries::reconcile_order_tokens(&mut conn, &order, owed)?
    };

    tracing::info!(
        order_id = %order.order_id,
        owed,
        created = outcome.created.len(),
        total = outcome.tokens.len(),
        "Order reconciled"
    );

    // Send only after the ledger transaction has committed; the full current
    // token set goes out, not just the newly minted suffix
    state
        .email
        .send_access_tokens(&recipient, &outcome.tokens)
        .await?;

    if outcome.created.is_empty() {
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "already_processed", "tokens": outcome.tokens })),
        )
            .into_response())
    } else {
        Ok((
            StatusCode::CREATED,
            Json(json!({
                "status": "stored",
                "createdTokens": outcome.created,
                "totalTokens": outcome.tokens.len(),
            })),
        )
            .into_response())
    }
}
