//! # Transaction Module
//!
//! An immutable record of one completed transfer between two accounts.
//!
//! Account references are weak (plain ids): deleting an account leaves
//! its historical transactions in place, and readers tolerate a missing
//! referent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A completed transfer. Write-once, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    /// Strictly positive.
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Record a transfer with a fresh id, stamped now
    pub fn record(
        from_account_id: impl Into<String>,
        to_account_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount,
            created_at: Utc::now(),
        }
    }

    /// Whether the given account is the source or destination
    pub fn involves(&self, account_id: &str) -> bool {
        self.from_account_id == account_id || self.to_account_id == account_id
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {} ({} -> {}, {})",
            self.id, self.from_account_id, self.to_account_id, self.amount
        )
    }
}
