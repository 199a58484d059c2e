use rusqlite::Connection;

/// Initialize the token ledger schema.
///
/// `seq` is the insertion sequence: reconciliation returns tokens ordered by
/// it, and AUTOINCREMENT keeps the sequence monotonic even across deletes
/// (which never happen in normal operation - the table is append-only).
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS order_tokens (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            order_id TEXT NOT NULL,
            order_number INTEGER,
            token TEXT NOT NULL UNIQUE,
            email TEXT,
            contact_email TEXT,
            customer_email TEXT,
            customer_first_name TEXT,
            customer_last_name TEXT,
            billing_name TEXT,
            shipping_name TEXT,
            created_at INTEGER NOT NULL,
            processed_at INTEGER,
            cancelled_at INTEGER,
            financial_status TEXT,
            test INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_order_tokens_order ON order_tokens(order_id);
        CREATE INDEX IF NOT EXISTS idx_order_tokens_email ON order_tokens(email);
        CREATE INDEX IF NOT EXISTS idx_order_tokens_contact_email ON order_tokens(contact_email);
        CREATE INDEX IF NOT EXISTS idx_order_tokens_customer_email ON order_tokens(customer_email);
        "#,
    )?;
    Ok(())
}
