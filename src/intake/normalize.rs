//! Payload normalization: turn an untyped webhook body into a
//! `NormalizedOrder` or fail with a stable validation code.
//!
//! The upstream sender is not authenticated and its payloads drift between
//! naming conventions (`created_at` vs `createdAt`), so every field is
//! extracted defensively. Normalization is a pure transform with no side
//! effects.

use chrono::DateTime;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{LineItem, NormalizedOrder};

/// Normalize an inbound order payload.
///
/// Fails with `missing_or_invalid_order_id` when the id is not a positive
/// integer or a numeric string, and with `invalid_timestamp` when
/// `created_at` is present but unparseable. All other fields degrade to
/// `None` (or `[]` for line items) rather than failing.
pub fn normalize(payload: &Value) -> Result<NormalizedOrder> {
    let order_id =
        extract_order_id(payload).ok_or(AppError::Validation("missing_or_invalid_order_id"))?;

    let created_at = match field(payload, &["created_at", "createdAt"]) {
        None | Some(Value::Null) => chrono::Utc::now().timestamp(),
        Some(value) => {
            parse_timestamp(value).ok_or(AppError::Validation("invalid_timestamp"))?
        }
    };

    let customer = payload.get("customer");

    let email = str_field(payload, "email");
    let contact_email = field(payload, &["contact_email", "contactEmail"])
        .and_then(Value::as_str)
        .map(str::to_string);
    let customer_email = customer.and_then(|c| str_field(c, "email"));

    let recipient = resolve_recipient(&[
        email.as_deref(),
        contact_email.as_deref(),
        customer_email.as_deref(),
    ]);

    Ok(NormalizedOrder {
        order_id,
        order_number: extract_order_number(payload),
        line_items: extract_line_items(payload),
        recipient,
        email,
        contact_email,
        customer_email,
        customer_first_name: customer.and_then(|c| str_field(c, "first_name")),
        customer_last_name: customer.and_then(|c| str_field(c, "last_name")),
        billing_name: payload
            .get("billing_address")
            .and_then(|a| str_field(a, "name")),
        shipping_name: payload
            .get("shipping_address")
            .and_then(|a| str_field(a, "name")),
        created_at,
        processed_at: optional_timestamp(payload, &["processed_at", "processedAt"]),
        cancelled_at: optional_timestamp(payload, &["cancelled_at", "cancelledAt"]),
        financial_status: str_field(payload, "financial_status"),
        test: payload.get("test").and_then(Value::as_bool).unwrap_or(false),
    })
}

/// Resolve the notification recipient from an ordered candidate list: the
/// first present, non-empty address wins.
pub fn resolve_recipient(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

/// Accept a positive integer or a string of digits (including values wider
/// than i64, which arrive as numeric strings). Everything else is invalid.
fn extract_order_id(payload: &Value) -> Option<String> {
    match payload.get("id") {
        Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            Some(s.clone())
        }
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) if v > 0 => Some(v.to_string()),
            _ => None,
        },
        _ => None,
    }
}

fn extract_order_number(payload: &Value) -> Option<i64> {
    match payload.get("order_number") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// Line items default to empty when the field is absent or not an array.
fn extract_line_items(payload: &Value) -> Vec<LineItem> {
    let Some(items) = payload.get("line_items").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| LineItem {
            product_id: match item.get("product_id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            },
            quantity: item.get("quantity").and_then(Value::as_i64),
        })
        .collect()
}

/// First value among the given field names (snake_case and camelCase
/// variants of the same field).
fn field<'a>(payload: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| payload.get(*name))
}

fn str_field(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_string)
}

/// RFC 3339 timestamp to Unix seconds. `None` for anything unparseable.
fn parse_timestamp(value: &Value) -> Option<i64> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.timestamp())
}

/// Optional timestamps are lenient: absent, null, or unparseable all map to
/// `None`.
fn optional_timestamp(payload: &Value, names: &[&str]) -> Option<i64> {
    field(payload, names).and_then(parse_timestamp)
}
