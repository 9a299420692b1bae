//! Credential strength policy
//!
//! A credential must be at least 8 characters and contain an upper-case
//! letter, a digit, and a symbol from a fixed punctuation set. The policy
//! applies to the credential alone, before any confirmation check.

use crate::error::{PassbookError, PassbookResult};

/// Minimum credential length in characters
pub const MIN_LENGTH: usize = 8;

/// The accepted punctuation set
pub const SYMBOLS: &str = "!@#$%^&*()_+=[{]};:<>|./?,-";

/// Validate a credential against the strength policy
pub fn validate_strength(credential: &str) -> PassbookResult<()> {
    if credential.chars().count() < MIN_LENGTH {
        return Err(PassbookError::WeakCredential(format!(
            "must be at least {} characters",
            MIN_LENGTH
        )));
    }

    if !credential.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PassbookError::WeakCredential(
            "must contain at least one upper-case letter".into(),
        ));
    }

    if !credential.chars().any(|c| c.is_ascii_digit()) {
        return Err(PassbookError::WeakCredential(
            "must contain at least one digit".into(),
        ));
    }

    if !credential.chars().any(|c| SYMBOLS.contains(c)) {
        return Err(PassbookError::WeakCredential(format!(
            "must contain at least one symbol from {}",
            SYMBOLS
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_strong_credential() {
        assert!(validate_strength("Str0ng!Pw").is_ok());
    }

    #[test]
    fn test_rejects_short_credential() {
        let err = validate_strength("weak").unwrap_err();
        assert!(matches!(err, PassbookError::WeakCredential(_)));
    }

    #[test]
    fn test_rejects_missing_uppercase() {
        assert!(validate_strength("str0ng!pw").is_err());
    }

    #[test]
    fn test_rejects_missing_digit() {
        assert!(validate_strength("Strong!Pw").is_err());
    }

    #[test]
    fn test_rejects_missing_symbol() {
        assert!(validate_strength("Str0ngPwd").is_err());
    }

    #[test]
    fn test_every_listed_symbol_satisfies_policy() {
        for symbol in SYMBOLS.chars() {
            let credential = format!("Passw0rd{}", symbol);
            assert!(
                validate_strength(&credential).is_ok(),
                "symbol {:?} rejected",
                symbol
            );
        }
    }
}
