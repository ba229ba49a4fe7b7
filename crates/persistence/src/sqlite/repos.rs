//! Repository implementations for SQLite
//!
//! CRUD operations for all tables. Every function takes the executor as
//! its first argument, so the same query runs against the pool or inside
//! a unit-of-work transaction (`&mut *tx`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqliteExecutor;

use ironbank_core::{BankAccount, Transaction, User};

use crate::error::{map_constraint_err, PersistenceError, PersistenceResult};
use crate::sqlite::schema::{AccountRow, TransactionRow, UserRow};

// ============================================================================
// User Repository
// ============================================================================

/// Repository for the users table
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user
    pub async fn insert(ex: impl SqliteExecutor<'_>, user: &User) -> PersistenceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, phone_number,
                address_line1, address_line2, address_line3,
                address_town, address_county, address_postcode,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.address.line1)
        .bind(&user.address.line2)
        .bind(&user.address.line3)
        .bind(&user.address.town)
        .bind(&user.address.county)
        .bind(&user.address.postcode)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(ex)
        .await
        .map_err(|e| map_constraint_err(e, "users.email"))?;
        Ok(())
    }

    /// Get a user by id
    pub async fn get_by_id(ex: impl SqliteExecutor<'_>, id: &str) -> PersistenceResult<UserRow> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(ex)
            .await?
            .ok_or_else(|| PersistenceError::not_found("User", id))
    }

    /// Look up a user by email (case-sensitive)
    pub async fn find_by_email(
        ex: impl SqliteExecutor<'_>,
        email: &str,
    ) -> PersistenceResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(ex)
            .await?;
        Ok(row)
    }

    /// Update a user's profile fields and timestamps
    pub async fn update(ex: impl SqliteExecutor<'_>, user: &User) -> PersistenceResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?, email = ?, phone_number = ?,
                address_line1 = ?, address_line2 = ?, address_line3 = ?,
                address_town = ?, address_county = ?, address_postcode = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.address.line1)
        .bind(&user.address.line2)
        .bind(&user.address.line3)
        .bind(&user.address.town)
        .bind(&user.address.county)
        .bind(&user.address.postcode)
        .bind(user.updated_at)
        .bind(&user.id)
        .execute(ex)
        .await
        .map_err(|e| map_constraint_err(e, "users.email"))?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("User", &user.id));
        }
        Ok(())
    }

    /// Delete a user
    pub async fn delete(ex: impl SqliteExecutor<'_>, id: &str) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(ex)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("User", id));
        }
        Ok(())
    }
}

// ============================================================================
// Account Repository
// ============================================================================

/// Repository for the accounts table
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account
    pub async fn insert(
        ex: impl SqliteExecutor<'_>,
        account: &BankAccount,
    ) -> PersistenceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, user_id, bank_name, account_type, sort_code,
                account_number, balance, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.user_id)
        .bind(&account.bank_name)
        .bind(&account.account_type)
        .bind(&account.sort_code)
        .bind(&account.account_number)
        .bind(account.balance.to_string())
        .bind(account.version)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(ex)
        .await?;
        Ok(())
    }

    /// Get an account by id
    pub async fn get_by_id(ex: impl SqliteExecutor<'_>, id: &str) -> PersistenceResult<AccountRow> {
        Self::find_by_id(ex, id)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Account", id))
    }

    /// Look up an account by id
    pub async fn find_by_id(
        ex: impl SqliteExecutor<'_>,
        id: &str,
    ) -> PersistenceResult<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(ex)
            .await?;
        Ok(row)
    }

    /// Look up an account by id, scoped to an owner
    pub async fn find_owned(
        ex: impl SqliteExecutor<'_>,
        id: &str,
        user_id: &str,
    ) -> PersistenceResult<Option<AccountRow>> {
        let row =
            sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = ? AND user_id = ?")
                .bind(id)
                .bind(user_id)
                .fetch_optional(ex)
                .await?;
        Ok(row)
    }

    /// All accounts owned by a user
    pub async fn list_by_owner(
        ex: impl SqliteExecutor<'_>,
        user_id: &str,
    ) -> PersistenceResult<Vec<AccountRow>> {
        let rows = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(ex)
            .await?;
        Ok(rows)
    }

    /// Number of accounts owned by a user
    pub async fn count_by_owner(
        ex: impl SqliteExecutor<'_>,
        user_id: &str,
    ) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(ex)
            .await?;
        Ok(row.0)
    }

    /// Update profile fields (never the balance - that moves only through
    /// `update_balance`)
    pub async fn update_profile(
        ex: impl SqliteExecutor<'_>,
        account: &BankAccount,
    ) -> PersistenceResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                bank_name = ?, account_type = ?, sort_code = ?,
                account_number = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.bank_name)
        .bind(&account.account_type)
        .bind(&account.sort_code)
        .bind(&account.account_number)
        .bind(account.updated_at)
        .bind(&account.id)
        .execute(ex)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", &account.id));
        }
        Ok(())
    }

    /// Write a new balance, guarded by the version stamp.
    ///
    /// Returns the number of rows affected: 0 means the stamp was stale
    /// (a concurrent writer got there first) and nothing was written.
    pub async fn update_balance(
        ex: impl SqliteExecutor<'_>,
        id: &str,
        balance: Decimal,
        expected_version: i64,
        updated_at: DateTime<Utc>,
    ) -> PersistenceResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET balance = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(balance.to_string())
        .bind(updated_at)
        .bind(id)
        .bind(expected_version)
        .execute(ex)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete an account
    pub async fn delete(ex: impl SqliteExecutor<'_>, id: &str) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(ex)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Repository for the transactions table. Insert-only: transfer records
/// are immutable, so there is no update or delete here.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Insert a new transfer record
    pub async fn insert(
        ex: impl SqliteExecutor<'_>,
        txn: &Transaction,
    ) -> PersistenceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, from_account_id, to_account_id, amount, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.from_account_id)
        .bind(&txn.to_account_id)
        .bind(txn.amount.to_string())
        .bind(txn.created_at)
        .execute(ex)
        .await?;
        Ok(())
    }

    /// Look up a transfer record by id
    pub async fn find_by_id(
        ex: impl SqliteExecutor<'_>,
        id: &str,
    ) -> PersistenceResult<Option<TransactionRow>> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_optional(ex)
            .await?;
        Ok(row)
    }

    /// All transfers touching any account owned by the user, newest first
    pub async fn list_for_owner(
        ex: impl SqliteExecutor<'_>,
        user_id: &str,
    ) -> PersistenceResult<Vec<TransactionRow>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT * FROM transactions
            WHERE from_account_id IN (SELECT id FROM accounts WHERE user_id = ?)
               OR to_account_id IN (SELECT id FROM accounts WHERE user_id = ?)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(ex)
        .await?;
        Ok(rows)
    }

    /// All transfers where the account is source or destination, newest
    /// first
    pub async fn list_for_account(
        ex: impl SqliteExecutor<'_>,
        account_id: &str,
    ) -> PersistenceResult<Vec<TransactionRow>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT * FROM transactions
            WHERE from_account_id = ? OR to_account_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(account_id)
        .bind(account_id)
        .fetch_all(ex)
        .await?;
        Ok(rows)
    }

    /// Count all transfer records
    pub async fn count(ex: impl SqliteExecutor<'_>) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(ex)
            .await?;
        Ok(row.0)
    }
}
