mod from_row;
mod schema;
pub mod queries;

pub use schema::init_db;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::email::EmailService;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Token ledger database pool
    pub db: DbPool,
    /// Outbound mail client
    pub email: EmailService,
    /// Product id whose line items earn access tokens
    pub target_product_id: String,
}

/// Create a bounded connection pool. Every pooled connection gets WAL mode
/// and a busy timeout so concurrent writers queue on SQLite's write lock
/// instead of failing with SQLITE_BUSY.
pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path).with_init(|conn| {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            PRAGMA foreign_keys = ON;
            "#,
        )
    });
    Pool::builder().max_size(10).build(manager)
}
