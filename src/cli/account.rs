//! Account command handlers
//!
//! Shared by the admin and user command groups: each handler calls one ledger
//! operation and prints its outcome.

use clap::Args;

use crate::config::Settings;
use crate::display::{format_account_details, format_account_list};
use crate::error::LedgerResult;
use crate::models::{AccountNumber, Money};
use crate::services::{AccountService, FundsService, TransferService};
use crate::storage::Storage;

use super::access::prompt_secret;

/// Arguments for opening a new account
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Account holder's full name
    #[arg(short, long)]
    pub name: String,
    /// Account password (prompted when omitted)
    #[arg(short, long, env = "LEDGER_NEW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Initial deposit (negative values are treated as zero)
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub deposit: Money,
}

/// Arguments for changing name or password
#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// New holder name (blank keeps the current one)
    #[arg(short, long)]
    pub name: Option<String>,
    /// New password (blank keeps the current one)
    #[arg(long, conflicts_with = "change_password")]
    pub new_password: Option<String>,
    /// Prompt for a new password
    #[arg(long)]
    pub change_password: bool,
}

/// Open a new account
pub fn create(storage: &Storage, settings: &Settings, args: CreateArgs) -> LedgerResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_secret("Set password: ")?,
    };

    let account = AccountService::new(storage).create(&args.name, &password, args.deposit)?;

    println!(
        "Account created successfully! Account No: {}",
        account.number
    );
    println!(
        "  Opening balance: {}",
        account.balance.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

/// Print every active account
pub fn list(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let accounts = AccountService::new(storage).list_active()?;
    print!("{}", format_account_list(&accounts, &settings.currency_symbol));
    Ok(())
}

/// Print one account
pub fn view(storage: &Storage, settings: &Settings, number: AccountNumber) -> LedgerResult<()> {
    let account = AccountService::new(storage).view(number)?;
    print!("{}", format_account_details(&account, &settings.currency_symbol));
    Ok(())
}

pub fn deposit(
    storage: &Storage,
    settings: &Settings,
    number: AccountNumber,
    amount: Money,
) -> LedgerResult<()> {
    let balance = FundsService::new(storage).deposit(number, amount)?;
    println!(
        "Deposit successful. New balance: {}",
        balance.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

pub fn withdraw(
    storage: &Storage,
    settings: &Settings,
    number: AccountNumber,
    amount: Money,
) -> LedgerResult<()> {
    let balance = FundsService::new(storage).withdraw(number, amount)?;
    println!(
        "Withdrawal successful. New balance: {}",
        balance.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

pub fn transfer(
    storage: &Storage,
    settings: &Settings,
    from: AccountNumber,
    to: AccountNumber,
    amount: Money,
) -> LedgerResult<()> {
    let result = TransferService::new(storage).transfer(from, to, amount)?;
    let symbol = &settings.currency_symbol;
    println!("Transfer successful.");
    println!(
        "  New balance of {}: {}",
        result.from.number,
        result.from.balance.format_with_symbol(symbol)
    );
    println!(
        "  New balance of {}: {}",
        result.to.number,
        result.to.balance.format_with_symbol(symbol)
    );
    Ok(())
}

/// Change name and/or password
pub fn modify(storage: &Storage, number: AccountNumber, args: ModifyArgs) -> LedgerResult<()> {
    let new_password = if args.change_password {
        Some(prompt_secret("Enter new password: ")?)
    } else {
        args.new_password
    };

    if args.name.is_none() && new_password.is_none() {
        println!("No changes specified. Use --name or --new-password.");
        return Ok(());
    }

    let account = AccountService::new(storage).modify(
        number,
        args.name.as_deref(),
        new_password.as_deref(),
    )?;
    println!("Account updated: {}", account);
    Ok(())
}

/// Soft-delete an account when confirmed
pub fn delete(storage: &Storage, number: AccountNumber, confirmed: bool) -> LedgerResult<()> {
    if AccountService::new(storage).delete(number, confirmed)? {
        println!("Account {} deleted (soft delete).", number);
    } else {
        println!("Deletion cancelled. Pass --yes to delete account {}.", number);
    }
    Ok(())
}
