use chrono::Utc;
use rusqlite::{params, Connection, TransactionBehavior};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NormalizedOrder, OrderToken};

use super::from_row::{query_all, query_one, ORDER_TOKEN_COLS};

fn now() -> i64 {
    Utc::now().timestamp()
}

fn gen_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate an access token: 48 bytes of OS entropy, hex-encoded to 96
/// characters.
pub fn generate_access_token() -> String {
    use rand::rngs::OsRng;
    use rand::RngCore;
    let mut bytes = [0u8; 48];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Outcome of a ledger reconciliation. Both lists are in insertion order;
/// `created` is the suffix of `tokens` minted by this call.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub tokens: Vec<String>,
    pub created: Vec<String>,
}

/// Bring the stored token count for an order up to the owed quantity.
///
/// Runs as a single immediate transaction: the write lock is taken before
/// the read, so two concurrent deliveries of the same order cannot both
/// observe `have < owed` and double-insert. Existing rows are never touched;
/// only the delta is inserted.
pub fn reconcile_order_tokens(
    conn: &mut Connection,
    order: &NormalizedOrder,
    owed: u32,
) -> Result<ReconcileOutcome> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut tokens: Vec<String> = {
        let mut stmt =
            tx.prepare("SELECT token FROM order_tokens WHERE order_id = ?1 ORDER BY seq ASC")?;
        let rows = stmt.query_map(params![&order.order_id], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    };

    let have = tokens.len() as u32;
    let mut created = Vec::new();

    for _ in have..owed {
        let token = generate_access_token();
        tx.execute(
            "INSERT INTO order_tokens (
                id, order_id, order_number, token,
                email, contact_email, customer_email,
                customer_first_name, customer_last_name,
                billing_name, shipping_name,
                created_at, processed_at, cancelled_at,
                financial_status, test
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                gen_id(),
                &order.order_id,
                order.order_number,
                &token,
                order.email,
                order.contact_email,
                order.customer_email,
                order.customer_first_name,
                order.customer_last_name,
                order.billing_name,
                order.shipping_name,
                order.created_at,
                order.processed_at,
                order.cancelled_at,
                order.financial_status,
                order.test,
            ],
        )?;
        tokens.push(token.clone());
        created.push(token);
    }

    tx.commit()?;

    Ok(ReconcileOutcome { tokens, created })
}

/// Look up a single ledger row by exact token match.
pub fn find_order_token(conn: &Connection, token: &str) -> Result<Option<OrderToken>> {
    query_one(
        conn,
        &format!("SELECT {} FROM order_tokens WHERE token = ?1", ORDER_TOKEN_COLS),
        &[&token],
    )
}

/// All ledger rows whose recipient matches the given address on any of the
/// three recipient columns, in insertion order.
pub fn find_order_tokens_by_email(conn: &Connection, email: &str) -> Result<Vec<OrderToken>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM order_tokens
             WHERE email = ?1 OR contact_email = ?1 OR customer_email = ?1
             ORDER BY seq ASC",
            ORDER_TOKEN_COLS
        ),
        &[&email],
    )
}

/// Number of ledger rows for an order.
pub fn count_order_tokens(conn: &Connection, order_id: &str) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM order_tokens WHERE order_id = ?1",
        params![order_id],
        |row| row.get(0),
    )
    .map_err(Into::into)
}
