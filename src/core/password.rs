//! Password hashing with Argon2id.
//!
//! The upstream design stored a toy 32-bit string hash; that derivation is
//! deliberately not carried over. Hashes are PHC strings, one random salt per
//! hash, default Argon2id parameters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::{BankError, Result};

/// Derives a PHC-encoded Argon2id hash for the given password.
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| BankError::Credential(err.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; a malformed stored hash is an error.
pub fn verify(password: &str, stored: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| BankError::Credential(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(BankError::Credential(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let digest = hash("secret1").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify("secret1", &digest).unwrap());
        assert!(!verify("secret2", &digest).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash("secret1").unwrap();
        let b = hash("secret1").unwrap();
        assert_ne!(a, b, "salts must differ between hashes");
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let err = verify("secret1", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, BankError::Credential(_)));
    }
}
