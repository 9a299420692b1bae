//! Credential hashing and comparison
//!
//! Credentials are stored as Argon2id PHC strings; the plaintext never
//! reaches the ledger file. Verification goes through Argon2 and the
//! confirmation check uses a constant-time byte comparison, so neither path
//! leaks timing information about the stored secret's content.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use subtle::ConstantTimeEq;

use crate::error::{PassbookError, PassbookResult};

/// Hash a credential into an Argon2id PHC string with a fresh random salt
pub fn hash_credential(credential: &str) -> PassbookResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(credential.as_bytes(), &salt)
        .map_err(|e| PassbookError::Storage(format!("Failed to hash credential: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a credential against a stored PHC hash string
///
/// A mismatch yields `InvalidCredential`; a malformed stored hash means the
/// record itself is damaged and yields the storage error.
pub fn verify_credential(credential: &str, stored_hash: &str) -> PassbookResult<()> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        PassbookError::Storage(format!("Stored credential hash is malformed: {}", e))
    })?;

    match Argon2::default().verify_password(credential.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(PassbookError::InvalidCredential),
        Err(e) => Err(PassbookError::Storage(format!(
            "Credential verification failed: {}",
            e
        ))),
    }
}

/// Constant-time equality for two secrets
///
/// Only the lengths are observable through timing, never the contents.
pub fn secrets_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
