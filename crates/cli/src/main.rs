//! Ironbank CLI - banking operations from the command line
//!
//! Usage:
//! ```bash
//! ironbank init
//! ironbank user register --name "Alice" --email alice@example.com \
//!     --phone +441234567890 --line1 "1 High Street" --password 'hunter2!'
//! ironbank --as alice@example.com account open --bank Ironbank --type personal \
//!     --sort-code 10-20-30 --number 12345678 --balance 100.00
//! ironbank --as alice@example.com deposit <account-id> 50.00
//! ironbank --as alice@example.com transfer <from-id> <to-id> 25.00
//! ironbank --as alice@example.com history list
//! ```
//!
//! `--as <email>` supplies the authenticated principal. Authentication
//! itself (tokens, sessions) is outside this binary; whatever fronts it
//! is expected to have verified the email before we get here.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod db;

use commands::{account, history, money, user};

/// Ironbank - user accounts, bank accounts, and money movement
#[derive(Parser)]
#[command(name = "ironbank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/ironbank.db", global = true)]
    pub db: PathBuf,

    /// Acting principal (authenticated email)
    #[arg(long = "as", value_name = "EMAIL", global = true)]
    pub principal: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// User management
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Bank account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Deposit funds into an account you own
    Deposit {
        /// Account ID
        account_id: String,
        /// Amount (two decimal places)
        amount: Decimal,
    },

    /// Withdraw funds from an account you own
    Withdraw {
        /// Account ID
        account_id: String,
        /// Amount (two decimal places)
        amount: Decimal,
    },

    /// Transfer funds between accounts (you must own the source)
    Transfer {
        /// Source account ID
        from: String,
        /// Destination account ID
        to: String,
        /// Amount (two decimal places)
        amount: Decimal,
    },

    /// Transaction history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Initialize database with schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new user
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email (becomes the login principal)
        #[arg(long)]
        email: String,
        /// Phone number
        #[arg(long)]
        phone: String,
        /// Address line 1
        #[arg(long)]
        line1: String,
        /// Address line 2
        #[arg(long)]
        line2: Option<String>,
        /// Address line 3
        #[arg(long)]
        line3: Option<String>,
        /// Town
        #[arg(long)]
        town: Option<String>,
        /// County
        #[arg(long)]
        county: Option<String>,
        /// Postcode
        #[arg(long)]
        postcode: Option<String>,
        /// Raw password (hashed before storage)
        #[arg(long)]
        password: String,
    },
    /// Show a user (your own record only)
    Show {
        /// User ID
        user_id: String,
    },
    /// Update your own profile
    Update {
        /// User ID
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        line1: String,
        #[arg(long)]
        line2: Option<String>,
        #[arg(long)]
        line3: Option<String>,
        #[arg(long)]
        town: Option<String>,
        #[arg(long)]
        county: Option<String>,
        #[arg(long)]
        postcode: Option<String>,
    },
    /// Delete your own user (requires no owned accounts)
    Delete {
        /// User ID
        user_id: String,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Open a new bank account
    Open {
        /// Bank name
        #[arg(long)]
        bank: String,
        /// Account type (free-form, e.g. "personal")
        #[arg(long = "type")]
        account_type: String,
        /// Sort code
        #[arg(long)]
        sort_code: String,
        /// Account number
        #[arg(long)]
        number: String,
        /// Opening balance
        #[arg(long, default_value = "0.00")]
        balance: Decimal,
    },
    /// List your accounts
    List,
    /// Show one of your accounts
    Show {
        /// Account ID
        account_id: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Update an account's profile fields
    Update {
        /// Account ID
        account_id: String,
        #[arg(long)]
        bank: String,
        #[arg(long = "type")]
        account_type: String,
        #[arg(long)]
        sort_code: String,
        #[arg(long)]
        number: String,
    },
    /// Close (delete) an account
    Close {
        /// Account ID
        account_id: String,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// All transfers touching your accounts, newest first
    List,
    /// Show one transfer you are a party to
    Show {
        /// Transaction ID
        transaction_id: String,
    },
    /// Transfers for one of your accounts, newest first
    Account {
        /// Account ID
        account_id: String,
    },
}

impl Cli {
    /// The acting principal, required by every authenticated command
    pub fn require_principal(&self) -> Result<&str> {
        match self.principal.as_deref() {
            Some(email) => Ok(email),
            None => bail!("this command needs an acting principal: pass --as <email>"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Ensure the data directory exists
    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match &cli.command {
        Commands::Init { force } => {
            db::init(&cli.db, *force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::User { action } => {
            user::handle(&cli, action).await?;
        }

        Commands::Account { action } => {
            account::handle(&cli, action).await?;
        }

        Commands::Deposit { account_id, amount } => {
            money::deposit(&cli, account_id, *amount).await?;
        }

        Commands::Withdraw { account_id, amount } => {
            money::withdraw(&cli, account_id, *amount).await?;
        }

        Commands::Transfer { from, to, amount } => {
            money::transfer(&cli, from, to, *amount).await?;
        }

        Commands::History { action } => {
            history::handle(&cli, action).await?;
        }
    }

    Ok(())
}
