//! User lifecycle - create, get, update, delete
//!
//! Email uniqueness is enforced at creation (and on update collision);
//! deletion is gated on the user owning no bank accounts. Passwords are
//! hashed on the way in and never leave as anything but an opaque hash.

use tracing::info;

use ironbank_core::{Address, CoreError, User};
use ironbank_persistence::{AccountRepo, PersistenceError, UserRepo};

use crate::error::{or_not_found, BusinessError, BusinessResult};
use crate::password::PasswordService;
use crate::services::ServiceContext;
use crate::{guard, identity};

/// Fields for registering a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: Address,
    /// Raw password; hashed before anything is persisted.
    pub password: String,
}

/// Mutable profile fields of an existing user
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: Address,
}

/// User Service - lifecycle operations
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
    passwords: PasswordService,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            passwords: PasswordService::new(),
        }
    }

    /// Register a new user. Duplicate email is a conflict.
    pub async fn create(&self, new: NewUser) -> BusinessResult<User> {
        if UserRepo::find_by_email(self.ctx.pool(), &new.email)
            .await?
            .is_some()
        {
            return Err(CoreError::EmailTaken(new.email).into());
        }

        let password_hash = self.passwords.hash(&new.password)?;
        let user = User::new(
            new.name,
            new.email,
            password_hash,
            new.phone_number,
            new.address,
        );

        // The UNIQUE column backstops the check above against a
        // concurrent registration of the same email.
        UserRepo::insert(self.ctx.pool(), &user)
            .await
            .map_err(|e| email_conflict(e, &user.email))?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Get a user by id, no principal check (internal callers)
    pub async fn get(&self, user_id: &str) -> BusinessResult<User> {
        let row = UserRepo::get_by_id(self.ctx.pool(), user_id)
            .await
            .map_err(|e| or_not_found(e, || CoreError::UserNotFound(user_id.to_string())))?;
        Ok(row.into())
    }

    /// Get a user by id on behalf of a principal.
    ///
    /// Users may only read their own record.
    pub async fn get_authenticated(&self, principal: &str, user_id: &str) -> BusinessResult<User> {
        let user = self.get(user_id).await?;
        if user.email != principal {
            return Err(CoreError::forbidden("users may only read their own record").into());
        }
        Ok(user)
    }

    /// Overwrite a user's profile fields
    pub async fn update(
        &self,
        principal: &str,
        user_id: &str,
        fields: UpdateUser,
    ) -> BusinessResult<User> {
        let acting = identity::resolve(self.ctx.pool(), principal).await?;
        let mut user = self.get(user_id).await?;
        guard::assert_is_self(&acting, &user.id)?;

        if fields.email != user.email {
            if let Some(existing) = UserRepo::find_by_email(self.ctx.pool(), &fields.email).await? {
                if existing.id != user.id {
                    return Err(CoreError::EmailTaken(fields.email).into());
                }
            }
        }

        user.name = fields.name;
        user.email = fields.email;
        user.phone_number = fields.phone_number;
        user.address = fields.address;
        user.touch();

        UserRepo::update(self.ctx.pool(), &user)
            .await
            .map_err(|e| email_conflict(e, &user.email))?;
        Ok(user)
    }

    /// Delete a user. Fails while the user still owns any account.
    pub async fn delete(&self, principal: &str, user_id: &str) -> BusinessResult<()> {
        let acting = identity::resolve(self.ctx.pool(), principal).await?;
        let user = self.get(user_id).await?;
        guard::assert_is_self(&acting, &user.id)?;

        // Gate and delete in one unit; an account opened in between
        // would otherwise be orphaned.
        let mut tx = self.ctx.begin().await?;
        let owned = AccountRepo::count_by_owner(&mut *tx, &user.id).await?;
        if owned > 0 {
            return Err(CoreError::UserHasAccounts(format!(
                "{} owns {owned} account(s)",
                user.id
            ))
            .into());
        }
        UserRepo::delete(&mut *tx, &user.id).await?;
        tx.commit().await.map_err(PersistenceError::from)?;

        info!(user_id = %user.id, "user deleted");
        Ok(())
    }
}

fn email_conflict(e: PersistenceError, email: &str) -> BusinessError {
    if e.is_unique_violation() {
        CoreError::EmailTaken(email.to_string()).into()
    } else {
        e.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountService, NewAccount};
    use ironbank_persistence::Database;
    use rust_decimal_macros::dec;

    async fn setup() -> (Database, ServiceContext) {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::from_pool(db.pool().clone());
        (db, ctx)
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            phone_number: "+441234567890".to_string(),
            address: Address::line1("1 High Street"),
            password: "hunter2!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let (_db, ctx) = setup().await;
        let service = UserService::new(&ctx);

        let user = service.create(new_user("a@x.com")).await.unwrap();
        assert_ne!(user.password_hash, "hunter2!");
        assert!(service.passwords.verify("hunter2!", &user.password_hash));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (_db, ctx) = setup().await;
        let service = UserService::new(&ctx);

        service.create(new_user("a@x.com")).await.unwrap();
        let err = service.create(new_user("a@x.com")).await.unwrap_err();
        assert!(err.is_conflict());

        // Only one user was persisted.
        let resolved = identity::resolve(ctx.pool(), "a@x.com").await.unwrap();
        assert_eq!(resolved.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_get_authenticated_scopes_to_self() {
        let (_db, ctx) = setup().await;
        let service = UserService::new(&ctx);

        let alice = service.create(new_user("alice@x.com")).await.unwrap();
        service.create(new_user("bob@x.com")).await.unwrap();

        let seen = service
            .get_authenticated("alice@x.com", &alice.id)
            .await
            .unwrap();
        assert_eq!(seen.id, alice.id);

        let err = service
            .get_authenticated("bob@x.com", &alice.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());

        let err = service
            .get_authenticated("alice@x.com", "missing-id")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (_db, ctx) = setup().await;
        let service = UserService::new(&ctx);

        let alice = service.create(new_user("alice@x.com")).await.unwrap();
        let bob = service.create(new_user("bob@x.com")).await.unwrap();

        let fields = UpdateUser {
            name: "Alice Jones".to_string(),
            email: "alice.jones@x.com".to_string(),
            phone_number: "+440000000000".to_string(),
            address: Address::line1("2 Low Street"),
        };

        // Bob cannot update Alice.
        let err = service
            .update("bob@x.com", &alice.id, fields.clone())
            .await
            .unwrap_err();
        assert!(err.is_forbidden());

        let updated = service.update("alice@x.com", &alice.id, fields).await.unwrap();
        assert_eq!(updated.name, "Alice Jones");
        assert_eq!(updated.email, "alice.jones@x.com");
        assert!(updated.updated_at >= updated.created_at);

        // Taking Bob's email is a conflict.
        let err = service
            .update(
                "alice.jones@x.com",
                &alice.id,
                UpdateUser {
                    name: "Alice".to_string(),
                    email: "bob@x.com".to_string(),
                    phone_number: "+440000000000".to_string(),
                    address: Address::line1("2 Low Street"),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        let _ = bob;
    }

    #[tokio::test]
    async fn test_delete_gated_on_owned_accounts() {
        let (_db, ctx) = setup().await;
        let service = UserService::new(&ctx);

        let alice = service.create(new_user("alice@x.com")).await.unwrap();
        AccountService::new(&ctx)
            .create(
                "alice@x.com",
                NewAccount {
                    bank_name: "Ironbank".to_string(),
                    account_type: "personal".to_string(),
                    sort_code: "10-20-30".to_string(),
                    account_number: "12345678".to_string(),
                    opening_balance: dec!(0.00),
                },
            )
            .await
            .unwrap();

        let err = service.delete("alice@x.com", &alice.id).await.unwrap_err();
        assert!(err.is_conflict());

        // User and account both remain.
        assert!(service.get(&alice.id).await.is_ok());
        assert_eq!(
            AccountService::new(&ctx).list("alice@x.com").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_without_accounts() {
        let (_db, ctx) = setup().await;
        let service = UserService::new(&ctx);

        let alice = service.create(new_user("alice@x.com")).await.unwrap();
        let bob = service.create(new_user("bob@x.com")).await.unwrap();

        // Only the user themselves may delete.
        let err = service.delete("bob@x.com", &alice.id).await.unwrap_err();
        assert!(err.is_forbidden());

        service.delete("alice@x.com", &alice.id).await.unwrap();
        let err = service.get(&alice.id).await.unwrap_err();
        assert!(err.is_not_found());
        let _ = bob;
    }
}
