//! Account CLI commands
//!
//! Maps subcommands onto account sessions: every command constructs one
//! session, authenticates it, performs the operation, and renders the
//! outcome. Credentials are prompted before any lock is taken.

use std::sync::Arc;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{PassbookError, PassbookResult};
use crate::models::Money;
use crate::services::AccountSession;
use crate::storage::LedgerStore;

use super::prompt::prompt_credential;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account identifier (login key)
        account_id: String,
    },
    /// Show the current balance
    Balance {
        /// Account identifier
        account_id: String,
    },
    /// Deposit an amount (e.g. "50" or "12.34")
    Deposit {
        /// Account identifier
        account_id: String,
        /// Amount in currency units
        amount: String,
    },
    /// Withdraw an amount (e.g. "50" or "12.34")
    Withdraw {
        /// Account identifier
        account_id: String,
        /// Amount in currency units
        amount: String,
    },
    /// Update holder profile fields
    Profile {
        /// Account identifier
        account_id: String,
        /// Holder first name
        #[arg(long)]
        first_name: Option<String>,
        /// Holder last name
        #[arg(long)]
        last_name: Option<String>,
        /// Holder national id
        #[arg(long)]
        national_id: Option<String>,
    },
}

/// Handle an account command
pub fn handle_account_command(
    store: Arc<LedgerStore>,
    settings: &Settings,
    cmd: AccountCommands,
) -> PassbookResult<()> {
    match cmd {
        AccountCommands::Create { account_id } => {
            let credential = prompt_credential("Credential: ")?;
            let confirmation = prompt_credential("Repeat credential: ")?;

            let mut session = AccountSession::new(store, &settings.issuer_prefix);
            session.create(&account_id, &credential, &confirmation)?;

            println!("Account created successfully!");
            println!("  Account ID: {}", account_id);
            if let Some(number) = session.account_number() {
                println!("  Account number: {}", number);
            }
        }

        AccountCommands::Balance { account_id } => {
            let session = authenticate(store, settings, &account_id)?;
            println!(
                "Balance: {}",
                session.balance().format_with_symbol(&settings.currency_symbol)
            );
        }

        AccountCommands::Deposit { account_id, amount } => {
            let amount = parse_amount(&amount)?;
            let mut session = authenticate(store, settings, &account_id)?;
            session.deposit(amount)?;

            println!(
                "Deposited {}.",
                amount.format_with_symbol(&settings.currency_symbol)
            );
            println!(
                "New balance: {}",
                session.balance().format_with_symbol(&settings.currency_symbol)
            );
        }

        AccountCommands::Withdraw { account_id, amount } => {
            let amount = parse_amount(&amount)?;
            let mut session = authenticate(store, settings, &account_id)?;
            session.withdraw(amount)?;

            println!(
                "Withdrew {}.",
                amount.format_with_symbol(&settings.currency_symbol)
            );
            println!(
                "New balance: {}",
                session.balance().format_with_symbol(&settings.currency_symbol)
            );
        }

        AccountCommands::Profile {
            account_id,
            first_name,
            last_name,
            national_id,
        } => {
            let mut session = authenticate(store, settings, &account_id)?;
            session.update_profile(
                first_name.as_deref(),
                last_name.as_deref(),
                national_id.as_deref(),
            )?;

            println!("Profile updated for {}.", account_id);
        }
    }

    Ok(())
}

/// Prompt for the credential and log the session in
///
/// Unknown identifiers and wrong credentials are collapsed into one error so
/// the console cannot be used to probe which account identifiers exist.
fn authenticate(
    store: Arc<LedgerStore>,
    settings: &Settings,
    account_id: &str,
) -> PassbookResult<AccountSession> {
    let credential = prompt_credential("Credential: ")?;

    let mut session = AccountSession::new(store, &settings.issuer_prefix);
    session.login(account_id, &credential).map_err(|e| {
        if e.is_auth_failure() {
            PassbookError::InvalidCredential
        } else {
            e
        }
    })?;

    Ok(session)
}

fn parse_amount(amount: &str) -> PassbookResult<Money> {
    Money::parse(amount).map_err(|e| PassbookError::InvalidAmount(e.to_string()))
}
