//! # Error Module
//!
//! Domain errors for Ironbank, using thiserror.
//!
//! Every variant classifies into one of five kinds ([`ErrorKind`]); the
//! layer above maps kinds to its own transport (exit codes, HTTP status,
//! ...) without inspecting individual variants.

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced user/account/transaction does not exist (or, on read
    /// paths, is owned by someone else).
    NotFound,
    /// Principal is authenticated but not authorized for the resource.
    Forbidden,
    /// Uniqueness or referential precondition would be violated.
    Conflict,
    /// Malformed or out-of-domain input (non-positive amount,
    /// insufficient funds, negative opening balance).
    Validation,
    /// Anything else; surfaced generically.
    Unexpected,
}

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Not found ===
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // === Authorization ===
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // === Conflicts ===
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("User still owns bank accounts: {0}")]
    UserHasAccounts(String),

    #[error("Account was modified concurrently: {0}")]
    ConcurrentUpdate(String),

    // === Validation ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    // === Other ===
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a Forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    /// Create an Unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Classify this error into its broad kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UserNotFound(_)
            | CoreError::AccountNotFound(_)
            | CoreError::TransactionNotFound(_) => ErrorKind::NotFound,
            CoreError::Forbidden(_) => ErrorKind::Forbidden,
            CoreError::EmailTaken(_)
            | CoreError::UserHasAccounts(_)
            | CoreError::ConcurrentUpdate(_) => ErrorKind::Conflict,
            CoreError::InvalidAmount(_) | CoreError::InsufficientFunds { .. } => {
                ErrorKind::Validation
            }
            CoreError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Check whether this is an insufficient funds error
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// Check whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check whether this is an authorization error
    pub fn is_forbidden(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = CoreError::InsufficientFunds {
            required: dec!(150.00),
            available: dec!(100.00),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: required 150.00, available 100.00"
        );

        let err = CoreError::AccountNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Account not found: abc");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CoreError::UserNotFound("u".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::forbidden("not yours").kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(CoreError::EmailTaken("a@x.com".into()).kind(), ErrorKind::Conflict);
        assert_eq!(
            CoreError::ConcurrentUpdate("acc".into()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CoreError::invalid_amount("zero").kind(),
            ErrorKind::Validation
        );
        assert_eq!(CoreError::unexpected("io").kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_error_checks() {
        let err = CoreError::InsufficientFunds {
            required: dec!(100),
            available: dec!(50),
        };
        assert!(err.is_insufficient_funds());
        assert!(!err.is_not_found());

        let err = CoreError::forbidden("someone else's account");
        assert!(err.is_forbidden());
    }
}
