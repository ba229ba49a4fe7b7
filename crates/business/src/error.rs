//! Business layer errors
//!
//! One wrapper over the domain and persistence errors so service
//! signatures stay uniform. `kind()` flattens everything onto the five
//! domain kinds for the caller.

use ironbank_core::{CoreError, ErrorKind};
use ironbank_persistence::PersistenceError;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// Classify into the domain error taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            BusinessError::Core(e) => e.kind(),
            BusinessError::Persistence(e) => match e {
                PersistenceError::NotFound { .. } => ErrorKind::NotFound,
                PersistenceError::UniqueViolation(_) => ErrorKind::Conflict,
                _ => ErrorKind::Unexpected,
            },
            BusinessError::PasswordHash(_) => ErrorKind::Unexpected,
        }
    }

    /// Check whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check whether this is an authorization error
    pub fn is_forbidden(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    /// Check whether this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// Check whether this is a validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// Map a persistence not-found onto a specific domain error, passing
/// other persistence failures through untouched.
pub(crate) fn or_not_found(
    e: PersistenceError,
    make: impl FnOnce() -> CoreError,
) -> BusinessError {
    if e.is_not_found() {
        make().into()
    } else {
        e.into()
    }
}
