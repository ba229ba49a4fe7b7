//! # Account Module
//!
//! BankAccount - a named balance owned by exactly one user.
//!
//! The balance is mutated only through [`BankAccount::credit`] and
//! [`BankAccount::debit`], which keep it non-negative. Everything else on
//! the account is plain profile data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// A bank account owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    /// Owning user id. An account without an owner is invalid.
    pub user_id: String,
    pub bank_name: String,
    /// Free-form account type ("personal", "savings", ...).
    pub account_type: String,
    pub sort_code: String,
    pub account_number: String,
    /// Non-negative at the end of every operation.
    pub balance: Decimal,
    /// Optimistic concurrency stamp; bumped by the storage layer on
    /// every balance write.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Open a new account with a fresh id and timestamps set to now.
    ///
    /// The opening balance must already be validated (see
    /// [`crate::money::require_opening_balance`]).
    pub fn open(
        user_id: impl Into<String>,
        bank_name: impl Into<String>,
        account_type: impl Into<String>,
        sort_code: impl Into<String>,
        account_number: impl Into<String>,
        opening_balance: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            bank_name: bank_name.into(),
            account_type: account_type.into(),
            sort_code: sort_code.into(),
            account_number: account_number.into(),
            balance: opening_balance,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account can cover `amount`
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Add to the balance. No upper bound.
    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    /// Subtract from the balance.
    ///
    /// Fails with `InsufficientFunds` and leaves the balance unchanged
    /// when the account cannot cover the amount.
    pub fn debit(&mut self, amount: Decimal) -> CoreResult<()> {
        if !self.can_cover(amount) {
            return Err(CoreError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} (owner: {}, balance: {})",
            self.id, self.user_id, self.balance
        )
    }
}
