use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::intake::resolve_recipient;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub order_id: String,
    pub order_number: Option<i64>,
    pub email: Option<String>,
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub billing_name: Option<String>,
    pub shipping_name: Option<String>,
    pub created_at: i64,
}

/// POST /login - exchange an access token for the order it belongs to.
/// The token is the sole credential.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let token = body
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Validation("missing_token"))?;

    let conn = state.db.get()?;
    let row = queries::find_order_token(&conn, token)?
        .ok_or(AppError::Unauthorized("Invalid token"))?;

    let email = resolve_recipient(&[
        row.email.as_deref(),
        row.contact_email.as_deref(),
        row.customer_email.as_deref(),
    ]);

    Ok(Json(LoginResponse {
        order_id: row.order_id,
        order_number: row.order_number,
        email,
        customer_first_name: row.customer_first_name,
        customer_last_name: row.customer_last_name,
        billing_name: row.billing_name,
        shipping_name: row.shipping_name,
        created_at: row.created_at,
    }))
}
