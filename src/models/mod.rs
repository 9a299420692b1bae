//! Core data models

pub mod account;
pub mod money;
pub mod timestamp;

pub use account::{AccountRecord, Ledger};
pub use money::Money;
