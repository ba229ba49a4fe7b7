//! Identity resolution
//!
//! Maps an authenticated principal (an email, already verified by the
//! caller) onto a concrete [`User`]. Every service funnels its acting
//! principal through here before touching anything else.

use sqlx::SqliteExecutor;

use ironbank_core::{CoreError, User};
use ironbank_persistence::UserRepo;

use crate::error::BusinessResult;

/// Resolve a principal email to its user record.
///
/// Pure read; fails with a not-found error when no user carries the
/// email (matched case-sensitively).
pub async fn resolve(ex: impl SqliteExecutor<'_>, email: &str) -> BusinessResult<User> {
    let row = UserRepo::find_by_email(ex, email).await?;
    row.map(User::from)
        .ok_or_else(|| CoreError::UserNotFound(email.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironbank_core::Address;
    use ironbank_persistence::Database;

    #[tokio::test]
    async fn test_resolve_known_principal() {
        let db = Database::in_memory().await.unwrap();
        let user = User::new(
            "Alice",
            "alice@example.com",
            "$argon2id$stub",
            "+441234567890",
            Address::line1("1 High Street"),
        );
        UserRepo::insert(db.pool(), &user).await.unwrap();

        let resolved = resolve(db.pool(), "alice@example.com").await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn test_resolve_unknown_principal_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let err = resolve(db.pool(), "ghost@example.com").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
