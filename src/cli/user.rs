//! User command group
//!
//! Operations on the logged-in account only.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{AccountNumber, Money};
use crate::storage::Storage;

use super::access::login;
use super::account::{self as handlers, ModifyArgs};

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Show account details
    View,
    /// Deposit into your account
    Deposit {
        /// Amount (e.g. "250" or "250.50")
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
    /// Withdraw from your account
    Withdraw {
        /// Amount
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
    /// Transfer to another account
    Transfer {
        /// Destination account number
        to: AccountNumber,
        /// Amount
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
    /// Change your name or password
    Modify(ModifyArgs),
}

/// Handle a user command after logging in
pub fn handle_user_command(
    storage: &Storage,
    settings: &Settings,
    account: AccountNumber,
    password: Option<String>,
    cmd: UserCommands,
) -> LedgerResult<()> {
    let me = login(storage, account, password)?;

    match cmd {
        UserCommands::View => handlers::view(storage, settings, me),
        UserCommands::Deposit { amount } => handlers::deposit(storage, settings, me, amount),
        UserCommands::Withdraw { amount } => handlers::withdraw(storage, settings, me, amount),
        UserCommands::Transfer { to, amount } => {
            handlers::transfer(storage, settings, me, to, amount)
        }
        UserCommands::Modify(args) => handlers::modify(storage, me, args),
    }
}
