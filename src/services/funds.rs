//! Funds service
//!
//! Deposits and withdrawals against a single account.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, Money};
use crate::storage::Storage;

use super::{require_active, require_positive};

/// Service for single-account balance changes
pub struct FundsService<'a> {
    storage: &'a Storage,
}

impl<'a> FundsService<'a> {
    /// Create a new funds service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add money to an account, returning the new balance
    pub fn deposit(&self, number: AccountNumber, amount: Money) -> LedgerResult<Money> {
        require_positive(amount)?;
        let _guard = self.storage.exclusive()?;

        let mut account = require_active(self.storage, number)?;
        account.balance = account.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Deposit of {} would take account {} past the maximum balance {}",
                amount,
                number,
                Money::MAX
            ))
        })?;

        self.storage.accounts.update_by_key(&account)?;

        tracing::info!(account = %number, amount = %amount, balance = %account.balance, "deposit");
        Ok(account.balance)
    }

    /// Take money from an account, returning the new balance
    pub fn withdraw(&self, number: AccountNumber, amount: Money) -> LedgerResult<Money> {
        require_positive(amount)?;
        let _guard = self.storage.exclusive()?;

        let mut account = require_active(self.storage, number)?;
        if amount > account.balance {
            tracing::warn!(account = %number, amount = %amount, balance = %account.balance, "withdrawal exceeds balance");
            return Err(LedgerError::InsufficientFunds {
                account: number,
                requested: amount,
                available: account.balance,
            });
        }

        account.balance -= amount;
        self.storage.accounts.update_by_key(&account)?;

        tracing::info!(account = %number, amount = %amount, balance = %account.balance, "withdrawal");
        Ok(account.balance)
    }
}
