//! Custom error types for passbook
//!
//! This module defines the error taxonomy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for passbook operations
#[derive(Error, Debug)]
pub enum PassbookError {
    /// An account with the given identifier already exists
    #[error("Account already exists: {account_id}")]
    AccountAlreadyExists { account_id: String },

    /// No account with the given identifier
    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: String },

    /// Credential did not match the stored one
    #[error("Invalid credential")]
    InvalidCredential,

    /// Credential does not satisfy the strength policy
    #[error("Weak credential: {0}")]
    WeakCredential(String),

    /// Credential and its confirmation differ
    #[error("Credential confirmation does not match")]
    CredentialMismatch,

    /// The session has already authenticated
    #[error("Session is already authenticated")]
    AlreadyAuthenticated,

    /// The operation requires an authenticated session
    #[error("Session is not authenticated")]
    NotAuthenticated,

    /// Amount rejected by validation
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The backing file could not be created, read, parsed, or written
    #[error("Storage unavailable: {0}")]
    Storage(String),
}

impl PassbookError {
    /// Create an "account not found" error
    pub fn account_not_found(account_id: impl Into<String>) -> Self {
        Self::AccountNotFound {
            account_id: account_id.into(),
        }
    }

    /// Create an "account already exists" error
    pub fn account_already_exists(account_id: impl Into<String>) -> Self {
        Self::AccountAlreadyExists {
            account_id: account_id.into(),
        }
    }

    /// Check if this is an authentication failure (bad id or bad credential)
    ///
    /// The CLI collapses both cases into one message so callers cannot probe
    /// which account identifiers exist.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AccountNotFound { .. } | Self::InvalidCredential)
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PassbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PassbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for passbook operations
pub type PassbookResult<T> = Result<T, PassbookError>;
