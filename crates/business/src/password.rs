//! Password hashing
//!
//! Argon2id hashing and verification. The rest of the system treats the
//! resulting hash as an opaque string; only the excluded authentication
//! layer ever calls `verify`.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{BusinessError, BusinessResult};

/// Password hashing service (Argon2id, per-password random salt)
#[derive(Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a raw password into a PHC-format string
    pub fn hash(&self, raw: &str) -> BusinessResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| BusinessError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a raw password against a stored hash.
    ///
    /// An unparseable hash verifies as false rather than erroring - a
    /// corrupt credential must never authenticate.
    pub fn verify(&self, raw: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new();
        let hash = service.hash("hunter2!").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify("hunter2!", &hash));
        assert!(!service.verify("hunter3!", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = PasswordService::new();
        let a = service.hash("hunter2!").unwrap();
        let b = service.hash("hunter2!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let service = PasswordService::new();
        assert!(!service.verify("hunter2!", "not-a-phc-string"));
    }
}
