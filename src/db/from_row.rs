//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::OrderToken;

/// Trait for constructing a type from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub const ORDER_TOKEN_COLS: &str = "id, seq, order_id, order_number, token, email, contact_email, customer_email, customer_first_name, customer_last_name, billing_name, shipping_name, created_at, processed_at, cancelled_at, financial_status, test";

impl FromRow for OrderToken {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(OrderToken {
            id: row.get(0)?,
            seq: row.get(1)?,
            order_id: row.get(2)?,
            order_number: row.get(3)?,
            token: row.get(4)?,
            email: row.get(5)?,
            contact_email: row.get(6)?,
            customer_email: row.get(7)?,
            customer_first_name: row.get(8)?,
            customer_last_name: row.get(9)?,
            billing_name: row.get(10)?,
            shipping_name: row.get(11)?,
            created_at: row.get(12)?,
            processed_at: row.get(13)?,
            cancelled_at: row.get(14)?,
            financial_status: row.get(15)?,
            test: row.get(16)?,
        })
    }
}
