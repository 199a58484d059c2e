use axum::extract::State;
use serde::Serialize;

use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::intake::resolve_recipient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendResponse {
    pub status: &'static str,
    pub total_tokens: usize,
}

/// POST /showroom-mails/{email}/send - manual resend.
///
/// Looks up every ledger row whose recipient matches the address on any of
/// the three recipient columns and re-sends the full token set in one email.
pub async fn resend_tokens(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ResendResponse>> {
    let rows = {
        let conn = state.db.get()?;
        queries::find_order_tokens_by_email(&conn, &email)?
    };

    if rows.is_empty() {
        return Err(AppError::NotFound(format!("No orders found for {}", email)));
    }

    let tokens: Vec<String> = rows.iter().map(|r| r.token.clone()).collect();

    let recipient = rows
        .iter()
        .find_map(|row| {
            resolve_recipient(&[
                row.email.as_deref(),
                row.contact_email.as_deref(),
                row.customer_email.as_deref(),
            ])
        })
        .ok_or_else(|| AppError::Conflict("No usable recipient address".into()))?;

    state.email.send_access_tokens(&recipient, &tokens).await?;

    tracing::info!(to = %recipient, tokens = tokens.len(), "Access tokens re-sent");

    Ok(Json(ResendResponse {
        status: "sent",
        total_tokens: tokens.len(),
    }))
}
