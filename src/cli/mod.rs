//! CLI commands and credential prompting

pub mod account;
pub mod prompt;

pub use account::{handle_account_command, AccountCommands};
