//! Account record model
//!
//! Represents one account as stored in the ledger snapshot. The snapshot file
//! is an object keyed by account identifier, so the identifier itself is not
//! part of the record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::timestamp;

/// The full durable mapping of account identifier -> record
///
/// A `BTreeMap` keeps the serialized snapshot deterministic for a given
/// ledger state.
pub type Ledger = BTreeMap<String, AccountRecord>;

/// One account as persisted in the ledger snapshot
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Argon2id PHC hash of the account credential
    pub password: String,

    /// Current balance, never negative
    pub balance: Money,

    /// System-generated globally unique numeric string
    pub account_number: String,

    /// Holder first name, empty until set
    #[serde(default)]
    pub first_name: String,

    /// Holder last name, empty until set
    #[serde(default)]
    pub last_name: String,

    /// Holder national id, empty until set
    #[serde(default)]
    pub ssn: String,

    /// Set once at creation
    #[serde(with = "timestamp::stamp")]
    pub created: NaiveDateTime,

    /// Absent until the first persisted mutation
    #[serde(
        default,
        with = "timestamp::stamp_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<NaiveDateTime>,
}

impl AccountRecord {
    /// Create a fresh record with zero balance and empty profile fields
    pub fn new(password_hash: impl Into<String>, account_number: impl Into<String>) -> Self {
        Self {
            password: password_hash.into(),
            balance: Money::zero(),
            account_number: account_number.into(),
            first_name: String::new(),
            last_name: String::new(),
            ssn: String::new(),
            created: timestamp::now(),
            modified: None,
        }
    }

    /// Record that the account was mutated now
    pub fn touch(&mut self) {
        self.modified = Some(timestamp::now());
    }
}

// The credential hash stays out of Debug output
impl fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountRecord")
            .field("password", &"[REDACTED]")
            .field("balance", &self.balance)
            .field("account_number", &self.account_number)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("ssn", &self.ssn)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish()
    }
}
