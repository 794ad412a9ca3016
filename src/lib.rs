//! Ledger - flat-file account ledger
//!
//! This library provides the core of a small account ledger: accounts with
//! sequential numbers, credentials, and balances, persisted as fixed-width
//! records in a single file. Balances change only through deposits,
//! withdrawals, and transfers, and never go negative.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and settings management
//! - `error`: Custom error types
//! - `models`: Account, account number, and money types
//! - `storage`: Fixed-width record file and its index
//! - `services`: Ledger operations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use ledger::models::Money;
//! use ledger::services::{AccountService, FundsService};
//! use ledger::storage::Storage;
//!
//! let storage = Storage::at("accounts.dat".into());
//! let account = AccountService::new(&storage).create("Asha Rao", "secret", Money::from_cents(50000))?;
//! FundsService::new(&storage).deposit(account.number, Money::from_cents(25000))?;
//! # Ok::<(), ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
