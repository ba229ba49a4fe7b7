//! Service context
//!
//! Shared database access for the business services. Each service
//! borrows a [`ServiceContext`]; ledger operations open their
//! unit-of-work transaction through it.

use sqlx::{Sqlite, SqlitePool, Transaction};

use ironbank_persistence::{Database, PersistenceError};

use crate::error::BusinessResult;

/// Context for business operations - holds database access
pub struct ServiceContext {
    pool: SqlitePool,
}

impl ServiceContext {
    /// Create a new service context from a database
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create from a pool directly
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a unit-of-work transaction.
    ///
    /// Dropping it without commit rolls back; early returns leave no
    /// partial effect.
    pub async fn begin(&self) -> BusinessResult<Transaction<'static, Sqlite>> {
        let tx = self.pool.begin().await.map_err(PersistenceError::from)?;
        Ok(tx)
    }
}
