use crate::models::NormalizedOrder;

/// Why an order was ignored rather than fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No line item matches the target product
    ProductMismatch,
    /// Not paid, or already cancelled
    UnsuccessfulOrder,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::ProductMismatch => "product_mismatch",
            IgnoreReason::UnsuccessfulOrder => "unsuccessful_order",
        }
    }
}

/// Classification outcome for a normalized order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Ignored(IgnoreReason),
    Eligible { owed: u32 },
}

/// Classify an order against the configured target product.
///
/// The product check runs before the payment check: an unpaid order for the
/// wrong product reports `product_mismatch`, not `unsuccessful_order`.
pub fn classify(order: &NormalizedOrder, target_product_id: &str) -> Eligibility {
    let owed = owed_quantity(order, target_product_id);
    if owed == 0 {
        return Eligibility::Ignored(IgnoreReason::ProductMismatch);
    }

    let paid = order
        .financial_status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("paid"));
    if !paid || order.cancelled_at.is_some() {
        return Eligibility::Ignored(IgnoreReason::UnsuccessfulOrder);
    }

    Eligibility::Eligible { owed }
}

/// Sum of quantities over line items matching the target product. Each
/// matching item contributes its quantity when that is a positive integer,
/// otherwise 1.
pub fn owed_quantity(order: &NormalizedOrder, target_product_id: &str) -> u32 {
    order
        .line_items
        .iter()
        .filter(|item| item.product_id.as_deref() == Some(target_product_id))
        .map(|item| match item.quantity {
            Some(q) if q >= 1 => u32::try_from(q).unwrap_or(u32::MAX),
            _ => 1,
        })
        .fold(0u32, u32::saturating_add)
}
