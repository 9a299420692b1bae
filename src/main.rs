use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use passbook::cli::{handle_account_command, AccountCommands};
use passbook::config::{paths::PassbookPaths, settings::Settings};
use passbook::storage::LedgerStore;

#[derive(Parser)]
#[command(
    name = "passbook",
    version,
    about = "File-backed personal banking ledger for the command line",
    long_about = "passbook is a personal banking ledger that keeps every \
                  account in one JSON snapshot file. Operations authenticate \
                  against stored credentials and every change is committed \
                  atomically before it is reported."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account operations (create, balance, deposit, withdraw, profile)
    #[command(subcommand)]
    Account(AccountCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PassbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            paths.ensure_directories()?;
            let store = Arc::new(LedgerStore::open(paths.ledger_file())?);
            handle_account_command(store, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("passbook Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Issuer prefix:   {}", settings.issuer_prefix);
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
        None => {
            println!("passbook - File-backed personal banking ledger");
            println!();
            println!("Run 'passbook --help' for usage information.");
            println!("Run 'passbook account create <id>' to open an account.");
        }
    }

    Ok(())
}
