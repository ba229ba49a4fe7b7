//! Ownership guard
//!
//! Pure authorization predicates over already-loaded records.
//!
//! - No IO
//! - No retries; a failure is terminal for the request
//! - No business logic beyond identity equality

use ironbank_core::{BankAccount, CoreError, CoreResult, User};

/// The user must own the account
pub fn assert_owns_account(user: &User, account: &BankAccount) -> CoreResult<()> {
    if account.user_id != user.id {
        return Err(CoreError::forbidden(format!(
            "account {} is not owned by the acting user",
            account.id
        )));
    }
    Ok(())
}

/// The acting user must be the target user
pub fn assert_is_self(user: &User, target_user_id: &str) -> CoreResult<()> {
    if user.id != target_user_id {
        return Err(CoreError::forbidden(
            "acting user may only operate on their own record",
        ));
    }
    Ok(())
}

/// The user must be a party to a transfer: owner of the source account
/// or of the destination account.
///
/// Owners are passed as options - a deleted account has no owner and
/// never matches.
pub fn assert_party(
    user: &User,
    from_owner: Option<&str>,
    to_owner: Option<&str>,
) -> CoreResult<()> {
    let owns_side = |owner: Option<&str>| owner == Some(user.id.as_str());
    if owns_side(from_owner) || owns_side(to_owner) {
        Ok(())
    } else {
        Err(CoreError::forbidden(
            "acting user is not a party to this transaction",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironbank_core::Address;
    use rust_decimal_macros::dec;

    fn test_user(email: &str) -> User {
        User::new(
            "Alice",
            email,
            "$argon2id$stub",
            "+441234567890",
            Address::line1("1 High Street"),
        )
    }

    fn account_of(user: &User) -> BankAccount {
        BankAccount::open(&user.id, "Ironbank", "personal", "10-20-30", "12345678", dec!(0.00))
    }

    #[test]
    fn test_owner_passes_stranger_fails() {
        let alice = test_user("alice@example.com");
        let bob = test_user("bob@example.com");
        let account = account_of(&alice);

        assert!(assert_owns_account(&alice, &account).is_ok());
        assert!(assert_owns_account(&bob, &account).unwrap_err().is_forbidden());
    }

    #[test]
    fn test_is_self() {
        let alice = test_user("alice@example.com");
        assert!(assert_is_self(&alice, &alice.id).is_ok());
        assert!(assert_is_self(&alice, "someone-else").unwrap_err().is_forbidden());
    }

    #[test]
    fn test_party_matches_either_side() {
        let alice = test_user("alice@example.com");

        assert!(assert_party(&alice, Some(&alice.id), Some("other")).is_ok());
        assert!(assert_party(&alice, Some("other"), Some(&alice.id)).is_ok());
        assert!(assert_party(&alice, Some("other"), Some("another"))
            .unwrap_err()
            .is_forbidden());
    }

    #[test]
    fn test_deleted_sides_never_match() {
        let alice = test_user("alice@example.com");
        assert!(assert_party(&alice, None, None).unwrap_err().is_forbidden());
        assert!(assert_party(&alice, None, Some(&alice.id)).is_ok());
    }
}
