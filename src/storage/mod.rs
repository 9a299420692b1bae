//! Storage layer for passbook
//!
//! Provides the file-backed ledger store with atomic snapshot writes.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use ledger::LedgerStore;
