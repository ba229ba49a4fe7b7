//! Account store - CRUD over bank accounts, scoped to the owning user
//!
//! Reads collapse "exists but owned by someone else" into not-found so
//! account ids don't leak existence; mutations load first and report
//! forbidden. Balance movement is not handled here - that is the ledger
//! engine's job.

use tracing::info;

use ironbank_core::{money, BankAccount, CoreError};
use ironbank_persistence::AccountRepo;
use rust_decimal::Decimal;

use crate::error::{or_not_found, BusinessResult};
use crate::services::ServiceContext;
use crate::{guard, identity};

/// Fields for opening a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub bank_name: String,
    pub account_type: String,
    pub sort_code: String,
    pub account_number: String,
    pub opening_balance: Decimal,
}

/// Mutable profile fields of an existing account.
///
/// Balance is deliberately absent: it moves only through the ledger
/// engine.
#[derive(Debug, Clone)]
pub struct UpdateAccount {
    pub bank_name: String,
    pub account_type: String,
    pub sort_code: String,
    pub account_number: String,
}

/// Account Service - account CRUD for the acting principal
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a new account owned by the principal
    pub async fn create(&self, principal: &str, new: NewAccount) -> BusinessResult<BankAccount> {
        let owner = identity::resolve(self.ctx.pool(), principal).await?;
        let opening_balance = money::require_opening_balance(new.opening_balance)?;

        let account = BankAccount::open(
            &owner.id,
            new.bank_name,
            new.account_type,
            new.sort_code,
            new.account_number,
            opening_balance,
        );
        AccountRepo::insert(self.ctx.pool(), &account).await?;

        info!(account_id = %account.id, owner = %owner.id, "account opened");
        Ok(account)
    }

    /// All accounts owned by the principal. Order unspecified.
    pub async fn list(&self, principal: &str) -> BusinessResult<Vec<BankAccount>> {
        let owner = identity::resolve(self.ctx.pool(), principal).await?;
        let rows = AccountRepo::list_by_owner(self.ctx.pool(), &owner.id).await?;
        rows.into_iter()
            .map(|row| row.try_into().map_err(Into::into))
            .collect()
    }

    /// Get one account by id.
    ///
    /// Missing and not-owned are both reported as not-found.
    pub async fn get(&self, principal: &str, account_id: &str) -> BusinessResult<BankAccount> {
        let owner = identity::resolve(self.ctx.pool(), principal).await?;
        let row = AccountRepo::find_owned(self.ctx.pool(), account_id, &owner.id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        Ok(row.try_into()?)
    }

    /// Overwrite the account's profile fields
    pub async fn update(
        &self,
        principal: &str,
        account_id: &str,
        fields: UpdateAccount,
    ) -> BusinessResult<BankAccount> {
        let acting = identity::resolve(self.ctx.pool(), principal).await?;
        let row = AccountRepo::get_by_id(self.ctx.pool(), account_id)
            .await
            .map_err(|e| or_not_found(e, || CoreError::AccountNotFound(account_id.to_string())))?;
        let mut account: BankAccount = row.try_into()?;

        guard::assert_owns_account(&acting, &account)?;

        account.bank_name = fields.bank_name;
        account.account_type = fields.account_type;
        account.sort_code = fields.sort_code;
        account.account_number = fields.account_number;
        account.updated_at = chrono::Utc::now();

        AccountRepo::update_profile(self.ctx.pool(), &account).await?;
        Ok(account)
    }

    /// Delete an account.
    ///
    /// Historical transactions keep their (now dangling) references.
    pub async fn delete(&self, principal: &str, account_id: &str) -> BusinessResult<()> {
        let acting = identity::resolve(self.ctx.pool(), principal).await?;
        let row = AccountRepo::get_by_id(self.ctx.pool(), account_id)
            .await
            .map_err(|e| or_not_found(e, || CoreError::AccountNotFound(account_id.to_string())))?;
        let account: BankAccount = row.try_into()?;

        guard::assert_owns_account(&acting, &account)?;

        AccountRepo::delete(self.ctx.pool(), account_id).await?;
        info!(account_id = %account_id, "account deleted");
        Ok(())
    }
}
