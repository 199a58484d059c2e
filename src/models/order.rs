use serde::{Deserialize, Serialize};

/// One row of the token ledger. The table holds one row per issued token,
/// not one per order: an order owed N tokens has N rows sharing its
/// `order_id`. Rows are append-only and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderToken {
    pub id: String,
    /// Insertion sequence (table autoincrement), used for stable token order
    pub seq: i64,
    pub order_id: String,
    pub order_number: Option<i64>,
    /// 96-character hex access token, globally unique
    pub token: String,
    pub email: Option<String>,
    pub contact_email: Option<String>,
    pub customer_email: Option<String>,
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub billing_name: Option<String>,
    pub shipping_name: Option<String>,
    pub created_at: i64,
    pub processed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub financial_status: Option<String>,
    pub test: bool,
}

/// Order fields extracted from an inbound webhook payload, after
/// normalization. Pure data, produced by `intake::normalize`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOrder {
    pub order_id: String,
    pub order_number: Option<i64>,
    pub line_items: Vec<LineItem>,
    /// First usable recipient address (resolution order: email,
    /// contact email, customer email)
    pub recipient: Option<String>,
    pub email: Option<String>,
    pub contact_email: Option<String>,
    pub customer_email: Option<String>,
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub billing_name: Option<String>,
    pub shipping_name: Option<String>,
    pub created_at: i64,
    pub processed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub financial_status: Option<String>,
    pub test: bool,
}

/// A single line item as extracted from the payload. Quantity is kept raw;
/// the eligibility classifier applies the default-to-1 rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
}
