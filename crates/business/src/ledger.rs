//! Ledger engine - deposit, withdraw, transfer
//!
//! The one place balances change. Every operation runs inside a single
//! database transaction: all reads, the balance write(s), and (for a
//! transfer) the transaction record commit together or not at all.
//!
//! Balance writes are guarded by the account's version stamp. A stale
//! stamp means another writer applied against the balance we read; the
//! whole unit aborts with a conflict and nothing is visible. The core
//! never retries - that is the caller's decision.

use rust_decimal::Decimal;
use sqlx::{Sqlite, Transaction as DbTransaction};
use tracing::info;

use ironbank_core::{money, BankAccount, CoreError, Transaction};
use ironbank_persistence::{AccountRepo, PersistenceError, TransactionRepo};

use crate::error::BusinessResult;
use crate::services::ServiceContext;
use crate::{guard, identity};

/// Outcome of a successful transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Debited source account, post-transfer.
    pub from: BankAccount,
    /// Credited destination account, post-transfer.
    pub to: BankAccount,
    /// The immutable record linking the two.
    pub transaction: Transaction,
}

/// Ledger Service - the balance-mutating operations
pub struct LedgerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LedgerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Deposit into an account owned by the principal
    pub async fn deposit(
        &self,
        principal: &str,
        account_id: &str,
        amount: Decimal,
    ) -> BusinessResult<BankAccount> {
        let amount = money::require_amount(amount)?;

        let mut tx = self.ctx.begin().await?;
        let acting = identity::resolve(&mut *tx, principal).await?;
        let mut account = load_account(&mut tx, account_id, None).await?;
        guard::assert_owns_account(&acting, &account)?;

        account.credit(amount);
        apply_balance(&mut tx, &mut account).await?;
        tx.commit().await.map_err(PersistenceError::from)?;

        info!(account_id = %account.id, %amount, "deposit applied");
        Ok(account)
    }

    /// Withdraw from an account owned by the principal
    pub async fn withdraw(
        &self,
        principal: &str,
        account_id: &str,
        amount: Decimal,
    ) -> BusinessResult<BankAccount> {
        let amount = money::require_amount(amount)?;

        let mut tx = self.ctx.begin().await?;
        let acting = identity::resolve(&mut *tx, principal).await?;
        let mut account = load_account(&mut tx, account_id, None).await?;
        guard::assert_owns_account(&acting, &account)?;

        account.debit(amount)?;
        apply_balance(&mut tx, &mut account).await?;
        tx.commit().await.map_err(PersistenceError::from)?;

        info!(account_id = %account.id, %amount, "withdrawal applied");
        Ok(account)
    }

    /// Transfer between two accounts.
    ///
    /// The principal must own the source account; the destination may
    /// belong to anyone. Debit, credit, and the transaction record are
    /// one atomic unit.
    pub async fn transfer(
        &self,
        principal: &str,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> BusinessResult<TransferReceipt> {
        let amount = money::require_amount(amount)?;
        if from_account_id == to_account_id {
            return Err(
                CoreError::invalid_amount("cannot transfer to the same account").into(),
            );
        }

        let mut tx = self.ctx.begin().await?;
        let acting = identity::resolve(&mut *tx, principal).await?;

        let mut from = load_account(&mut tx, from_account_id, Some("sender")).await?;
        let mut to = load_account(&mut tx, to_account_id, Some("recipient")).await?;

        // Source ownership only; third-party destinations are allowed.
        guard::assert_owns_account(&acting, &from)?;

        from.debit(amount)?;
        to.credit(amount);

        apply_balance(&mut tx, &mut from).await?;
        apply_balance(&mut tx, &mut to).await?;

        let transaction = Transaction::record(from_account_id, to_account_id, amount);
        TransactionRepo::insert(&mut *tx, &transaction).await?;

        tx.commit().await.map_err(PersistenceError::from)?;

        info!(
            transaction_id = %transaction.id,
            from = %from.id,
            to = %to.id,
            %amount,
            "transfer committed"
        );
        Ok(TransferReceipt {
            from,
            to,
            transaction,
        })
    }
}

/// Load an account inside the unit of work, mapping a missing row onto
/// the domain not-found error. `side` names the missing end of a
/// transfer ("sender" / "recipient").
async fn load_account(
    tx: &mut DbTransaction<'static, Sqlite>,
    account_id: &str,
    side: Option<&str>,
) -> BusinessResult<BankAccount> {
    let row = AccountRepo::find_by_id(&mut **tx, account_id)
        .await?
        .ok_or_else(|| match side {
            Some(side) => CoreError::AccountNotFound(format!("{account_id} ({side})")),
            None => CoreError::AccountNotFound(account_id.to_string()),
        })?;
    Ok(row.try_into()?)
}

/// Persist a mutated balance with the version-stamp guard.
///
/// Zero rows affected means a concurrent writer won; the caller's
/// transaction must abort.
async fn apply_balance(
    tx: &mut DbTransaction<'static, Sqlite>,
    account: &mut BankAccount,
) -> BusinessResult<()> {
    let affected = AccountRepo::update_balance(
        &mut **tx,
        &account.id,
        account.balance,
        account.version,
        account.updated_at,
    )
    .await?;
    if affected == 0 {
        return Err(CoreError::ConcurrentUpdate(account.id.clone()).into());
    }
    account.version += 1;
    Ok(())
}
