//! # Ironbank Persistence
//!
//! SQLite persistence layer: connection pool, migrations, row types and
//! repositories over the users / accounts / transactions tables.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ironbank_persistence::{AccountRepo, Database};
//!
//! let db = Database::init("sqlite:ironbank.db").await?;
//! let accounts = AccountRepo::list_by_owner(db.pool(), &user.id).await?;
//! ```
//!
//! Ledger operations open a sqlx transaction from [`Database::pool`] and
//! pass `&mut *tx` to the same repository functions, so one unit of work
//! carries every read and write of an operation.

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::schema::{AccountRow, TransactionRow, UserRow};
pub use sqlite::{create_pool, init_database, run_migrations, AccountRepo, TransactionRepo, UserRepo};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Database facade - owns the connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to an existing database without touching the schema
    pub async fn connect(db_url: &str) -> PersistenceResult<Self> {
        let pool = create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Create the database if missing and apply migrations
    pub async fn init(db_url: &str) -> PersistenceResult<Self> {
        let pool = init_database(db_url).await?;
        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied.
    ///
    /// A single connection keeps the database alive for the pool's
    /// lifetime (each SQLite `:memory:` connection is its own database).
    pub async fn in_memory() -> PersistenceResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, flushing outstanding work
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
