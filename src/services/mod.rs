//! Service layer for the ledger
//!
//! The service layer provides the ledger operations on top of the record
//! store, enforcing the balance and identity rules. Services never touch the
//! record file directly.

pub mod account;
pub mod funds;
pub mod transfer;

pub use account::AccountService;
pub use funds::FundsService;
pub use transfer::{TransferResult, TransferService};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money};
use crate::storage::Storage;

/// Load an active account or fail with `NotFound`
fn require_active(storage: &Storage, number: AccountNumber) -> LedgerResult<Account> {
    storage
        .accounts
        .find_by_key(number)?
        .ok_or_else(|| LedgerError::account_not_found(number))
}

/// Reject zero and negative amounts
fn require_positive(amount: Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}
