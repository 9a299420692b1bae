//! Ledger store
//!
//! Single source of truth for all accounts, backed by one JSON snapshot file.
//! The file always holds a complete, syntactically valid mapping of account
//! identifier -> record; every commit rewrites it atomically.
//!
//! One store instance is constructed at process start and shared by every
//! session. Commits run under a single coarse write lock held across the
//! whole read-modify-write-persist cycle, so concurrent mutations of
//! different accounts cannot overwrite each other's updates at the snapshot
//! level. Per-account serialization is layered on top via [`mutation_lock`].
//!
//! [`mutation_lock`]: LedgerStore::mutation_lock

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{PassbookError, PassbookResult};
use crate::models::Ledger;

use super::file_io::{read_json, write_json_atomic};

/// File-backed store for the full account mapping
pub struct LedgerStore {
    path: PathBuf,
    snapshot: RwLock<Ledger>,
    mutation_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LedgerStore {
    /// Open the store, initializing the backing file with an empty mapping
    /// if it does not exist yet
    ///
    /// Fails if the file cannot be created or read, or holds malformed data.
    pub fn open(path: impl Into<PathBuf>) -> PassbookResult<Self> {
        let path = path.into();

        let snapshot = if path.exists() {
            read_json(&path)?
        } else {
            let empty = Ledger::new();
            write_json_atomic(&path, &empty)?;
            empty
        };

        Ok(Self {
            path,
            snapshot: RwLock::new(snapshot),
            mutation_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the backing snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a copy of the current full mapping
    pub fn read_all(&self) -> PassbookResult<Ledger> {
        let snapshot = self.snapshot.read().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(snapshot.clone())
    }

    /// Atomically replace the stored snapshot with the given mapping
    ///
    /// On failure neither the file nor the in-memory snapshot changes.
    pub fn write_all(&self, ledger: Ledger) -> PassbookResult<()> {
        let mut snapshot = self.snapshot.write().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        write_json_atomic(&self.path, &ledger)?;
        *snapshot = ledger;
        Ok(())
    }

    /// Run a read-modify-write-persist cycle as one commit
    ///
    /// `apply` receives a working copy of the current mapping. If it returns
    /// an error, or the persist fails, the stored snapshot is left untouched.
    /// The new mapping becomes visible to readers only after it has been
    /// durably written.
    pub fn mutate<T, F>(&self, apply: F) -> PassbookResult<T>
    where
        F: FnOnce(&mut Ledger) -> PassbookResult<T>,
    {
        let mut snapshot = self.snapshot.write().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut working = snapshot.clone();
        let out = apply(&mut working)?;

        write_json_atomic(&self.path, &working)?;
        *snapshot = working;
        Ok(out)
    }

    /// All account identifiers currently in the store
    pub fn account_ids(&self) -> PassbookResult<BTreeSet<String>> {
        let snapshot = self.snapshot.read().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(snapshot.keys().cloned().collect())
    }

    /// All generated account numbers currently in the store
    pub fn account_numbers(&self) -> PassbookResult<BTreeSet<String>> {
        let snapshot = self.snapshot.read().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(snapshot
            .values()
            .map(|record| record.account_number.clone())
            .collect())
    }

    /// Get the shared mutation lock for one account identifier
    ///
    /// Sessions hold this lock for the duration of a single mutation so that
    /// mutations of the same account are serialized across sessions, while
    /// mutations of different accounts contend only on the brief snapshot
    /// commit itself.
    pub fn mutation_lock(&self, account_id: &str) -> PassbookResult<Arc<Mutex<()>>> {
        let mut locks = self.mutation_locks.lock().map_err(|e| {
            PassbookError::Storage(format!("Failed to acquire lock registry: {}", e))
        })?;

        Ok(locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountRecord, Money};
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::open(temp_dir.path().join("ledger.json")).unwrap();
        (temp_dir, store)
    }

    fn record(number: &str) -> AccountRecord {
        AccountRecord::new("$argon2id$fake", number)
    }

    #[test]
    fn test_open_creates_empty_snapshot() {
        let (temp_dir, store) = open_store();

        assert!(temp_dir.path().join("ledger.json").exists());
        assert!(store.read_all().unwrap().is_empty());

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_open_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(LedgerStore::open(&path).is_err());
    }

    #[test]
    fn test_write_all_and_reload() {
        let (temp_dir, store) = open_store();

        let mut ledger = Ledger::new();
        ledger.insert("alice".to_string(), record("78101066660000000000000001"));
        store.write_all(ledger).unwrap();

        // A second store over the same file sees the committed state
        let reloaded = LedgerStore::open(temp_dir.path().join("ledger.json")).unwrap();
        let all = reloaded.read_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key("alice"));
    }

    #[test]
    fn test_write_all_of_read_all_is_noop() {
        let (_temp_dir, store) = open_store();

        let mut ledger = Ledger::new();
        ledger.insert("alice".to_string(), record("78101066660000000000000001"));
        ledger.insert("bob".to_string(), record("78101066660000000000000002"));
        store.write_all(ledger).unwrap();

        let before = fs::read_to_string(store.path()).unwrap();
        store.write_all(store.read_all().unwrap()).unwrap();
        let after = fs::read_to_string(store.path()).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_mutate_commits() {
        let (_temp_dir, store) = open_store();

        store
            .mutate(|ledger| {
                ledger.insert("alice".to_string(), record("78101066660000000000000001"));
                Ok(())
            })
            .unwrap();

        assert!(store.read_all().unwrap().contains_key("alice"));
    }

    #[test]
    fn test_mutate_error_leaves_snapshot_untouched() {
        let (_temp_dir, store) = open_store();

        let result: PassbookResult<()> = store.mutate(|ledger| {
            ledger.insert("alice".to_string(), record("78101066660000000000000001"));
            Err(PassbookError::InvalidAmount("rejected".into()))
        });

        assert!(result.is_err());
        assert!(store.read_all().unwrap().is_empty());

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_mutate_persist_failure_leaves_snapshot_untouched() {
        let (_temp_dir, store) = open_store();

        store
            .mutate(|ledger| {
                ledger.insert("alice".to_string(), record("78101066660000000000000001"));
                Ok(())
            })
            .unwrap();

        // Make the rename step fail by replacing the file with a directory
        fs::remove_file(store.path()).unwrap();
        fs::create_dir(store.path()).unwrap();

        let result = store.mutate(|ledger| {
            ledger.get_mut("alice").unwrap().balance = Money::from_cents(999);
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(
            store.read_all().unwrap()["alice"].balance,
            Money::zero()
        );
    }

    #[test]
    fn test_derived_sets() {
        let (_temp_dir, store) = open_store();

        store
            .mutate(|ledger| {
                ledger.insert("alice".to_string(), record("78101066660000000000000001"));
                ledger.insert("bob".to_string(), record("78101066660000000000000002"));
                Ok(())
            })
            .unwrap();

        let ids = store.account_ids().unwrap();
        assert!(ids.contains("alice") && ids.contains("bob"));

        let numbers = store.account_numbers().unwrap();
        assert!(numbers.contains("78101066660000000000000001"));
        assert!(numbers.contains("78101066660000000000000002"));
    }

    #[test]
    fn test_mutation_lock_is_shared_per_account() {
        let (_temp_dir, store) = open_store();

        let a1 = store.mutation_lock("alice").unwrap();
        let a2 = store.mutation_lock("alice").unwrap();
        let b = store.mutation_lock("bob").unwrap();

        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
    }

    #[test]
    fn test_concurrent_mutations_of_different_accounts_both_commit() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(LedgerStore::open(temp_dir.path().join("ledger.json")).unwrap());

        store
            .mutate(|ledger| {
                ledger.insert("alice".to_string(), record("78101066660000000000000001"));
                ledger.insert("bob".to_string(), record("78101066660000000000000002"));
                Ok(())
            })
            .unwrap();

        let handles: Vec<_> = [("alice", 500i64), ("bob", 700i64)]
            .into_iter()
            .map(|(id, cents)| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..20 {
                        store
                            .mutate(|ledger| {
                                let record = ledger.get_mut(id).unwrap();
                                record.balance += Money::from_cents(cents);
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let all = store.read_all().unwrap();
        assert_eq!(all["alice"].balance, Money::from_cents(20 * 500));
        assert_eq!(all["bob"].balance, Money::from_cents(20 * 700));
    }
}
