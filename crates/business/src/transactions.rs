//! Transaction history queries
//!
//! Read-only access to the immutable transfer records. Visibility is
//! party-scoped: a principal sees a transaction only through an account
//! they own. Records referencing deleted accounts survive; the deleted
//! side simply resolves to no owner.

use sqlx::SqlitePool;

use ironbank_core::{CoreError, Transaction};
use ironbank_persistence::{AccountRepo, TransactionRepo, TransactionRow};

use crate::error::{or_not_found, BusinessResult};
use crate::services::ServiceContext;
use crate::{guard, identity};

/// Transaction Service - history lookups for the acting principal
pub struct TransactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get one transfer record by id.
    ///
    /// The principal must own the source or the destination account.
    pub async fn get(&self, principal: &str, transaction_id: &str) -> BusinessResult<Transaction> {
        let pool = self.ctx.pool();
        let acting = identity::resolve(pool, principal).await?;

        let row = TransactionRepo::find_by_id(pool, transaction_id)
            .await?
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        let txn: Transaction = row.try_into()?;

        let from_owner = account_owner(pool, &txn.from_account_id).await?;
        let to_owner = account_owner(pool, &txn.to_account_id).await?;
        guard::assert_party(&acting, from_owner.as_deref(), to_owner.as_deref())?;

        Ok(txn)
    }

    /// All transfers touching any of the principal's accounts, newest
    /// first.
    pub async fn list(&self, principal: &str) -> BusinessResult<Vec<Transaction>> {
        let acting = identity::resolve(self.ctx.pool(), principal).await?;
        let rows = TransactionRepo::list_for_owner(self.ctx.pool(), &acting.id).await?;
        collect(rows)
    }

    /// All transfers where the given account is source or destination,
    /// newest first. The principal must own the account.
    pub async fn list_for_account(
        &self,
        principal: &str,
        account_id: &str,
    ) -> BusinessResult<Vec<Transaction>> {
        let pool = self.ctx.pool();
        let acting = identity::resolve(pool, principal).await?;

        let row = AccountRepo::get_by_id(pool, account_id)
            .await
            .map_err(|e| or_not_found(e, || CoreError::AccountNotFound(account_id.to_string())))?;
        let account = row.try_into()?;
        guard::assert_owns_account(&acting, &account)?;

        let rows = TransactionRepo::list_for_account(pool, account_id).await?;
        collect(rows)
    }
}

/// Owner id of an account, or None when the account no longer exists
/// (tombstone for the deleted side of an old transfer).
async fn account_owner(pool: &SqlitePool, account_id: &str) -> BusinessResult<Option<String>> {
    let row = AccountRepo::find_by_id(pool, account_id).await?;
    Ok(row.map(|r| r.user_id))
}

fn collect(rows: Vec<TransactionRow>) -> BusinessResult<Vec<Transaction>> {
    rows.into_iter()
        .map(|row| row.try_into().map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountService, NewAccount};
    use crate::ledger::LedgerService;
    use crate::users::{NewUser, UserService};
    use ironbank_core::{Address, BankAccount};
    use ironbank_persistence::Database;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn setup() -> (Database, ServiceContext) {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::from_pool(db.pool().clone());
        (db, ctx)
    }

    async fn register(ctx: &ServiceContext, email: &str) {
        UserService::new(ctx)
            .create(NewUser {
                name: "Test".to_string(),
                email: email.to_string(),
                phone_number: "+441234567890".to_string(),
                address: Address::line1("1 High Street"),
                password: "hunter2!".to_string(),
            })
            .await
            .unwrap();
    }

    async fn open_account(ctx: &ServiceContext, email: &str, balance: Decimal) -> BankAccount {
        AccountService::new(ctx)
            .create(
                email,
                NewAccount {
                    bank_name: "Ironbank".to_string(),
                    account_type: "personal".to_string(),
                    sort_code: "10-20-30".to_string(),
                    account_number: "12345678".to_string(),
                    opening_balance: balance,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_both_parties_can_read_a_transfer() {
        let (_db, ctx) = setup().await;
        register(&ctx, "alice@example.com").await;
        register(&ctx, "bob@example.com").await;
        register(&ctx, "carol@example.com").await;
        let x = open_account(&ctx, "alice@example.com", dec!(100.00)).await;
        let y = open_account(&ctx, "bob@example.com", dec!(0.00)).await;

        let receipt = LedgerService::new(&ctx)
            .transfer("alice@example.com", &x.id, &y.id, dec!(25.00))
            .await
            .unwrap();

        let service = TransactionService::new(&ctx);
        let seen_by_sender = service
            .get("alice@example.com", &receipt.transaction.id)
            .await
            .unwrap();
        let seen_by_recipient = service
            .get("bob@example.com", &receipt.transaction.id)
            .await
            .unwrap();
        assert_eq!(seen_by_sender.id, seen_by_recipient.id);
        assert_eq!(seen_by_sender.amount, dec!(25.00));

        // A third party is neither sender nor recipient.
        let err = service
            .get("carol@example.com", &receipt.transaction.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn test_missing_transaction_is_not_found() {
        let (_db, ctx) = setup().await;
        register(&ctx, "alice@example.com").await;

        let err = TransactionService::new(&ctx)
            .get("alice@example.com", "missing-id")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_across_accounts() {
        let (_db, ctx) = setup().await;
        register(&ctx, "alice@example.com").await;
        register(&ctx, "bob@example.com").await;
        let x = open_account(&ctx, "alice@example.com", dec!(100.00)).await;
        let y = open_account(&ctx, "alice@example.com", dec!(100.00)).await;
        let z = open_account(&ctx, "bob@example.com", dec!(0.00)).await;
        let ledger = LedgerService::new(&ctx);

        ledger.transfer("alice@example.com", &x.id, &z.id, dec!(10.00)).await.unwrap();
        ledger.transfer("alice@example.com", &y.id, &z.id, dec!(20.00)).await.unwrap();
        ledger.transfer("bob@example.com", &z.id, &x.id, dec!(5.00)).await.unwrap();

        let service = TransactionService::new(&ctx);
        let history = service.list("alice@example.com").await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));

        // Account-scoped view only carries that account's transfers.
        let x_history = service
            .list_for_account("alice@example.com", &x.id)
            .await
            .unwrap();
        assert_eq!(x_history.len(), 2);
        assert!(x_history.iter().all(|t| t.involves(&x.id)));
    }

    #[tokio::test]
    async fn test_list_for_account_enforces_ownership() {
        let (_db, ctx) = setup().await;
        register(&ctx, "alice@example.com").await;
        register(&ctx, "bob@example.com").await;
        let x = open_account(&ctx, "alice@example.com", dec!(100.00)).await;

        let service = TransactionService::new(&ctx);
        let err = service
            .list_for_account("bob@example.com", &x.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());

        let err = service
            .list_for_account("alice@example.com", "missing-id")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_counterparty_becomes_tombstone() {
        let (_db, ctx) = setup().await;
        register(&ctx, "alice@example.com").await;
        register(&ctx, "bob@example.com").await;
        let x = open_account(&ctx, "alice@example.com", dec!(100.00)).await;
        let y = open_account(&ctx, "bob@example.com", dec!(0.00)).await;

        let receipt = LedgerService::new(&ctx)
            .transfer("alice@example.com", &x.id, &y.id, dec!(25.00))
            .await
            .unwrap();

        AccountService::new(&ctx)
            .delete("bob@example.com", &y.id)
            .await
            .unwrap();

        // The record survives and the surviving party still reads it.
        let service = TransactionService::new(&ctx);
        let txn = service
            .get("alice@example.com", &receipt.transaction.id)
            .await
            .unwrap();
        assert_eq!(txn.to_account_id, y.id);

        // The deleted side no longer grants anyone access.
        let err = service
            .get("bob@example.com", &receipt.transaction.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }
}
