//! Database schema definitions
//!
//! Row types for sqlx mapping from SQLite tables. The schema itself is
//! defined in migrations/20260801000000_init.sql. Decimals are stored as
//! TEXT, so conversions back to domain entities are fallible.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ironbank_core::{Address, BankAccount, Transaction, User};

use crate::error::PersistenceError;

/// Row type for the `users` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub address_town: Option<String>,
    pub address_county: Option<String>,
    pub address_postcode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type for the `accounts` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: String,
    pub user_id: String,
    pub bank_name: String,
    pub account_type: String,
    pub sort_code: String,
    pub account_number: String,
    pub balance: String, // Decimal stored as TEXT
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type for the `transactions` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: String, // Decimal stored as TEXT
    pub created_at: DateTime<Utc>,
}

// === Conversion implementations ===

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            phone_number: row.phone_number,
            address: Address {
                line1: row.address_line1,
                line2: row.address_line2,
                line3: row.address_line3,
                town: row.address_town,
                county: row.address_county,
                postcode: row.address_postcode,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<AccountRow> for BankAccount {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let balance = parse_decimal(&row.balance)?;
        Ok(BankAccount {
            id: row.id,
            user_id: row.user_id,
            bank_name: row.bank_name,
            account_type: row.account_type,
            sort_code: row.sort_code,
            account_number: row.account_number,
            balance,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let amount = parse_decimal(&row.amount)?;
        Ok(Transaction {
            id: row.id,
            from_account_id: row.from_account_id,
            to_account_id: row.to_account_id,
            amount,
            created_at: row.created_at,
        })
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(text).map_err(|e| PersistenceError::InvalidDecimal(format!("{text}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_row_round_trip() {
        let row = AccountRow {
            id: "acc-1".to_string(),
            user_id: "user-1".to_string(),
            bank_name: "Ironbank".to_string(),
            account_type: "personal".to_string(),
            sort_code: "10-20-30".to_string(),
            account_number: "12345678".to_string(),
            balance: "100.00".to_string(),
            version: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let account = BankAccount::try_from(row).unwrap();
        assert_eq!(account.balance, dec!(100.00));
        assert_eq!(account.version, 3);
    }

    #[test]
    fn test_bad_decimal_is_rejected() {
        let row = TransactionRow {
            id: "txn-1".to_string(),
            from_account_id: "acc-1".to_string(),
            to_account_id: "acc-2".to_string(),
            amount: "not-a-number".to_string(),
            created_at: Utc::now(),
        };

        let err = Transaction::try_from(row).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidDecimal(_)));
    }
}
