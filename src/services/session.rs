//! Account session
//!
//! An in-memory view of exactly one account, gated by authentication.
//! A session starts unauthenticated; `create` and `login` are the only ways
//! to authenticate, and there is no logout: a new session is a new view.
//!
//! Every mutation runs under the account's mutation lock and the store's
//! commit path, and the session's own fields are updated only after the
//! snapshot has been durably written. A failed persist therefore leaves the
//! session view identical to durable state.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::Rng;

use crate::auth::{hash_credential, secrets_match, validate_strength, verify_credential};
use crate::error::{PassbookError, PassbookResult};
use crate::models::{AccountRecord, Ledger, Money};
use crate::storage::LedgerStore;

/// Random digits appended to the issuer prefix in generated account numbers
const RANDOM_DIGITS: usize = 16;

/// Retry cap for account-number generation
///
/// The keyspace makes collisions vanishingly rare; exhausting the cap means
/// the stored number set is not what it should be.
const MAX_NUMBER_ATTEMPTS: usize = 1024;

/// A per-caller authenticated view of one account
pub struct AccountSession {
    store: Arc<LedgerStore>,
    issuer_prefix: String,

    authenticated: bool,
    account_id: Option<String>,
    balance: Money,
    account_number: Option<String>,
    first_name: String,
    last_name: String,
    national_id: String,
    created: Option<NaiveDateTime>,
    modified: Option<NaiveDateTime>,
}

impl AccountSession {
    /// Create an unauthenticated session over the shared store
    pub fn new(store: Arc<LedgerStore>, issuer_prefix: impl Into<String>) -> Self {
        Self {
            store,
            issuer_prefix: issuer_prefix.into(),
            authenticated: false,
            account_id: None,
            balance: Money::zero(),
            account_number: None,
            first_name: String::new(),
            last_name: String::new(),
            national_id: String::new(),
            created: None,
            modified: None,
        }
    }

    /// Whether the session has authenticated
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The account identifier, once known
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Current balance; zero before authentication
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// The generated account number, once authenticated
    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    /// Holder first name; empty before authentication or until set
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Holder last name; empty before authentication or until set
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Holder national id; empty before authentication or until set
    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// Creation timestamp, once authenticated
    pub fn created(&self) -> Option<NaiveDateTime> {
        self.created
    }

    /// Last-mutation timestamp, if any mutation has been persisted
    pub fn modified(&self) -> Option<NaiveDateTime> {
        self.modified
    }

    /// Create a new account and authenticate the session as it
    ///
    /// The credential must satisfy the strength policy on its own, and must
    /// equal its confirmation under a constant-time comparison. The account
    /// identifier must be free. On success the record is durably written
    /// with a zero balance and a fresh unique account number, and the
    /// session hydrates from it.
    pub fn create(
        &mut self,
        account_id: &str,
        credential: &str,
        confirmation: &str,
    ) -> PassbookResult<()> {
        if self.authenticated {
            return Err(PassbookError::AlreadyAuthenticated);
        }

        validate_strength(credential)?;

        if !secrets_match(credential, confirmation) {
            return Err(PassbookError::CredentialMismatch);
        }

        // Hash before taking any lock; Argon2 is deliberately slow
        let password_hash = hash_credential(credential)?;

        let lock = self.store.mutation_lock(account_id)?;
        let _guard = lock.lock().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire account lock: {}", e))
        })?;

        let issuer_prefix = self.issuer_prefix.clone();
        let record = self.store.mutate(|ledger| {
            if ledger.contains_key(account_id) {
                return Err(PassbookError::account_already_exists(account_id));
            }

            let number = generate_account_number(&issuer_prefix, ledger)?;
            let record = AccountRecord::new(password_hash, number);
            ledger.insert(account_id.to_string(), record.clone());
            Ok(record)
        })?;

        self.hydrate(account_id.to_string(), record);
        Ok(())
    }

    /// Authenticate against an existing account and hydrate the session
    pub fn login(&mut self, account_id: &str, credential: &str) -> PassbookResult<()> {
        if self.authenticated {
            return Err(PassbookError::AlreadyAuthenticated);
        }

        let ledger = self.store.read_all()?;
        let record = ledger
            .get(account_id)
            .ok_or_else(|| PassbookError::account_not_found(account_id))?;

        verify_credential(credential, &record.password)?;

        self.hydrate(account_id.to_string(), record.clone());
        Ok(())
    }

    /// Add a strictly positive amount to the balance and persist
    pub fn deposit(&mut self, amount: Money) -> PassbookResult<()> {
        let account_id = self.authenticated_id()?.to_string();

        if !amount.is_positive() {
            return Err(PassbookError::InvalidAmount(
                "deposit must be greater than zero".into(),
            ));
        }

        let record = self.commit(&account_id, |record| {
            record.balance += amount;
            Ok(())
        })?;

        self.apply(record);
        Ok(())
    }

    /// Remove a strictly positive amount from the balance and persist
    ///
    /// Amounts exceeding the current balance are rejected, keeping the
    /// balance non-negative.
    pub fn withdraw(&mut self, amount: Money) -> PassbookResult<()> {
        let account_id = self.authenticated_id()?.to_string();

        if !amount.is_positive() {
            return Err(PassbookError::InvalidAmount(
                "withdrawal must be greater than zero".into(),
            ));
        }

        let record = self.commit(&account_id, |record| {
            if amount > record.balance {
                return Err(PassbookError::InvalidAmount(format!(
                    "withdrawal exceeds current balance of {}",
                    record.balance
                )));
            }
            record.balance -= amount;
            Ok(())
        })?;

        self.apply(record);
        Ok(())
    }

    /// Update the holder profile fields and persist
    ///
    /// `None` leaves a field unchanged.
    pub fn update_profile(
        &mut self,
        first_name: Option<&str>,
        last_name: Option<&str>,
        national_id: Option<&str>,
    ) -> PassbookResult<()> {
        let account_id = self.authenticated_id()?.to_string();

        let record = self.commit(&account_id, |record| {
            if let Some(first_name) = first_name {
                record.first_name = first_name.to_string();
            }
            if let Some(last_name) = last_name {
                record.last_name = last_name.to_string();
            }
            if let Some(national_id) = national_id {
                record.ssn = national_id.to_string();
            }
            Ok(())
        })?;

        self.apply(record);
        Ok(())
    }

    /// One serialized read-modify-write-persist cycle for this account
    ///
    /// Holds the account's mutation lock for the duration, applies `change`
    /// to the stored record, stamps `modified`, and commits through the
    /// store. Returns the record as persisted.
    fn commit<F>(&self, account_id: &str, change: F) -> PassbookResult<AccountRecord>
    where
        F: FnOnce(&mut AccountRecord) -> PassbookResult<()>,
    {
        let lock = self.store.mutation_lock(account_id)?;
        let _guard = lock.lock().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire account lock: {}", e))
        })?;

        self.store.mutate(|ledger| {
            let record = ledger
                .get_mut(account_id)
                .ok_or_else(|| PassbookError::account_not_found(account_id))?;

            change(record)?;
            record.touch();
            Ok(record.clone())
        })
    }

    fn authenticated_id(&self) -> PassbookResult<&str> {
        if !self.authenticated {
            return Err(PassbookError::NotAuthenticated);
        }
        self.account_id
            .as_deref()
            .ok_or(PassbookError::NotAuthenticated)
    }

    /// Populate every session field from a stored record and authenticate
    fn hydrate(&mut self, account_id: String, record: AccountRecord) {
        self.balance = record.balance;
        self.account_number = Some(record.account_number);
        self.first_name = record.first_name;
        self.last_name = record.last_name;
        self.national_id = record.ssn;
        self.created = Some(record.created);
        self.modified = record.modified;
        self.account_id = Some(account_id);
        self.authenticated = true;
    }

    /// Refresh the mutable session fields after a committed mutation
    fn apply(&mut self, record: AccountRecord) {
        self.balance = record.balance;
        self.first_name = record.first_name;
        self.last_name = record.last_name;
        self.national_id = record.ssn;
        self.modified = record.modified;
    }
}

/// Generate an account number not present in the ledger
///
/// Issuer prefix plus 16 random decimal digits, regenerated on collision up
/// to the retry cap.
fn generate_account_number(prefix: &str, ledger: &Ledger) -> PassbookResult<String> {
    let taken: BTreeSet<&str> = ledger
        .values()
        .map(|record| record.account_number.as_str())
        .collect();

    let mut rng = rand::thread_rng();
    for _ in 0..MAX_NUMBER_ATTEMPTS {
        let mut number = String::with_capacity(prefix.len() + RANDOM_DIGITS);
        number.push_str(prefix);
        for _ in 0..RANDOM_DIGITS {
            number.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }

        if !taken.contains(number.as_str()) {
            return Ok(number);
        }
    }

    Err(PassbookError::Storage(format!(
        "Could not generate a unique account number after {} attempts",
        MAX_NUMBER_ATTEMPTS
    )))
}
