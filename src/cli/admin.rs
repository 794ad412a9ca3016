//! Admin command group
//!
//! Full access to every account, gated by the admin secret.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{AccountNumber, Money};
use crate::storage::Storage;

use super::access::verify_admin;
use super::account::{self as handlers, CreateArgs, ModifyArgs};

/// Admin subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Open a new account
    Create(CreateArgs),
    /// List active accounts
    List,
    /// Show one account
    View {
        /// Account number
        account: AccountNumber,
    },
    /// Deposit into an account
    Deposit {
        /// Account number
        account: AccountNumber,
        /// Amount (e.g. "250" or "250.50")
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
    /// Withdraw from an account
    Withdraw {
        /// Account number
        account: AccountNumber,
        /// Amount
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
    /// Move money between two accounts
    Transfer {
        /// Source account number
        from: AccountNumber,
        /// Destination account number
        to: AccountNumber,
        /// Amount
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
    /// Change an account's name or password
    Modify {
        /// Account number
        account: AccountNumber,
        #[command(flatten)]
        args: ModifyArgs,
    },
    /// Soft-delete an account
    Delete {
        /// Account number
        account: AccountNumber,
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an admin command after checking the secret
pub fn handle_admin_command(
    storage: &Storage,
    settings: &Settings,
    secret: Option<String>,
    cmd: AdminCommands,
) -> LedgerResult<()> {
    verify_admin(settings, secret)?;

    match cmd {
        AdminCommands::Create(args) => handlers::create(storage, settings, args),
        AdminCommands::List => handlers::list(storage, settings),
        AdminCommands::View { account } => handlers::view(storage, settings, account),
        AdminCommands::Deposit { account, amount } => {
            handlers::deposit(storage, settings, account, amount)
        }
        AdminCommands::Withdraw { account, amount } => {
            handlers::withdraw(storage, settings, account, amount)
        }
        AdminCommands::Transfer { from, to, amount } => {
            handlers::transfer(storage, settings, from, to, amount)
        }
        AdminCommands::Modify { account, args } => handlers::modify(storage, account, args),
        AdminCommands::Delete { account, yes } => handlers::delete(storage, account, yes),
    }
}
